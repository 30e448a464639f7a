//! Percent-encoding of remote paths.
//!
//! Segments are encoded like RFC 3986 unreserved-only encoding: everything
//! except ASCII alphanumerics and `-_.~` becomes `%XX` (spaces included).

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode `value` as a single path segment. `/` is encoded too.
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Encode every `/`-separated segment of `path` independently.
///
/// Leading and trailing slashes are dropped; inner separators are kept.
pub fn encode_path(path: &str) -> String {
    let trimmed = trim_slashes(path);
    if trimmed.is_empty() {
        return String::new();
    }

    trimmed
        .split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// Decode `%XX` escapes. Invalid UTF-8 sequences are replaced.
pub fn decode(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

/// Strip every leading and trailing `/`.
pub fn trim_slashes(value: &str) -> &str {
    value.trim_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment_escapes_separators_and_spaces() {
        assert_eq!(encode_segment("docs/my folder"), "docs%2Fmy%20folder");
        assert_eq!(encode_segment("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(encode_segment("x+y&z"), "x%2By%26z");
    }

    #[test]
    fn test_encode_segment_utf8() {
        assert_eq!(encode_segment("zażółć"), "za%C5%BC%C3%B3%C5%82%C4%87");
    }

    #[test]
    fn test_encode_path_keeps_separators() {
        assert_eq!(encode_path("/faktury/2024 Q1/"), "faktury/2024%20Q1");
        assert_eq!(encode_path(""), "");
        assert_eq!(encode_path("///"), "");
    }

    #[test]
    fn test_decoding_recovers_original_names() {
        for name in ["Raport roczny", "Łódź ćma", "plan (v2).pdf", "100% done"] {
            assert_eq!(decode(&encode_segment(name)), name);
        }
    }

    #[test]
    fn test_decode_keeps_plus_sign() {
        assert_eq!(decode("a+b%20c"), "a+b c");
    }
}
