//! WebDAV client errors.
//!
//! The `Display` output of every variant is the message returned to API
//! callers in the `error` field of the JSON envelope.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use davbridge_core::error::{AppError, ErrorKind};

use crate::client::DavMethod;

/// Failure of a single WebDAV operation.
#[derive(Debug, Error)]
pub enum DavError {
    /// The server could not be reached or the exchange timed out.
    #[error("Błąd połączenia: {0}")]
    Transport(String),

    /// The local file to upload could not be opened or sized.
    #[error("Błąd odczytu pliku {}: {source}", .path.display())]
    LocalFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request could not be built (e.g. an invalid header value).
    #[error("Nieprawidłowe żądanie: {0}")]
    InvalidRequest(String),

    /// The server answered with a status the operation does not accept.
    #[error("{}", rejection_message(.method, .status))]
    Protocol { method: DavMethod, status: StatusCode },

    /// `DELETE` targeted a resource that does not exist.
    #[error("Plik nie istnieje.")]
    NotFound,

    /// A multi-status body was not well-formed XML.
    #[error("Nie udało się sparsować XML: {0}")]
    Parse(String),
}

impl DavError {
    /// Error category used when mapping into [`AppError`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) | Self::LocalFile { .. } => ErrorKind::Transport,
            Self::InvalidRequest(_) => ErrorKind::Validation,
            Self::Protocol { .. } => ErrorKind::Protocol,
            Self::NotFound => ErrorKind::NotFound,
            Self::Parse(_) => ErrorKind::Parse,
        }
    }
}

/// Rejection text per verb. Existing callers match these strings exactly,
/// trailing space included.
fn rejection_message(method: &DavMethod, status: &StatusCode) -> String {
    let code = status.as_u16();
    match method {
        DavMethod::Mkcol | DavMethod::Delete => format!("Błąd: {code} "),
        DavMethod::Put => format!("Błąd HTTP {code}"),
        DavMethod::Propfind => format!("Błąd HTTP: {code} "),
    }
}

impl From<reqwest::Error> for DavError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::InvalidRequest(err.to_string());
        }

        if err.is_timeout() {
            return Self::Transport(format!("przekroczono limit czasu ({err})"));
        }

        Self::Transport(err.to_string())
    }
}

impl From<DavError> for AppError {
    fn from(err: DavError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        Self::with_source(kind, message, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_verbatim() {
        assert_eq!(DavError::NotFound.to_string(), "Plik nie istnieje.");
    }

    #[test]
    fn test_protocol_message_depends_on_verb() {
        let rejected = |method| {
            DavError::Protocol {
                method,
                status: StatusCode::METHOD_NOT_ALLOWED,
            }
            .to_string()
        };

        assert_eq!(rejected(DavMethod::Mkcol), "Błąd: 405 ");
        assert_eq!(rejected(DavMethod::Delete), "Błąd: 405 ");
        assert_eq!(rejected(DavMethod::Put), "Błąd HTTP 405");
        assert_eq!(rejected(DavMethod::Propfind), "Błąd HTTP: 405 ");
    }

    #[test]
    fn test_maps_into_app_error() {
        let app: AppError = DavError::Parse("unexpected end".to_string()).into();
        assert_eq!(app.kind, ErrorKind::Parse);
        assert_eq!(app.message, "Nie udało się sparsować XML: unexpected end");
    }
}
