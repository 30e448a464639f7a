//! Extraction of `<href>` values from a WebDAV multi-status body.
//!
//! Elements are matched by local name, so any namespace prefix (`D:`, `d:`,
//! none) is accepted.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::DavError;

/// Return the `href` child of every `response` element, in document order.
///
/// Responses without an `href` are skipped. Malformed XML, a document
/// without a root element and a truncated document are errors.
pub fn parse_hrefs(xml: &str) -> Result<Vec<String>, DavError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut hrefs = Vec::new();
    let mut depth: usize = 0;
    let mut seen_root = false;
    let mut response_depth: Option<usize> = None;
    let mut href: Option<String> = None;
    let mut in_href = false;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                seen_root = true;
                depth += 1;
                match e.local_name().as_ref() {
                    b"response" => {
                        response_depth = Some(depth);
                        href = None;
                    }
                    b"href" if response_depth == Some(depth - 1) && href.is_none() => {
                        in_href = true;
                        text.clear();
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(_)) => {
                seen_root = true;
            }
            Ok(Event::Text(e)) if in_href => {
                let value = e
                    .unescape()
                    .map_err(|e| DavError::Parse(e.to_string()))?;
                text.push_str(&value);
            }
            Ok(Event::CData(e)) if in_href => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::End(e)) => {
                match e.local_name().as_ref() {
                    b"href" if in_href => {
                        in_href = false;
                        href = Some(text.trim().to_string());
                    }
                    b"response" if response_depth == Some(depth) => {
                        if let Some(value) = href.take() {
                            hrefs.push(value);
                        }
                        response_depth = None;
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DavError::Parse(format!(
                    "{e} (position {})",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }

    if !seen_root {
        return Err(DavError::Parse("document has no root element".to_string()));
    }

    if depth != 0 {
        return Err(DavError::Parse("unexpected end of document".to_string()));
    }

    Ok(hrefs)
}
