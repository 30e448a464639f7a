//! Response DTOs.

use std::collections::BTreeMap;

use serde::Serialize;

use davbridge_storage::{DavError, DirectoryNode};

use crate::messages;

/// `{success, error}` envelope used by `/mkdir`, `/delete` and failures.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OperationResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error message, empty on success.
    pub error: String,
}

impl OperationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: String::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

impl From<Result<(), DavError>> for OperationResponse {
    fn from(result: Result<(), DavError>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

/// `GET /list` body.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Directory tree; empty on failure.
    pub directories: DirectoryNode,
}

impl From<Result<DirectoryNode, DavError>> for ListResponse {
    fn from(result: Result<DirectoryNode, DavError>) -> Self {
        match result {
            Ok(directories) => Self {
                success: true,
                error: None,
                directories,
            },
            Err(e) => Self {
                success: false,
                error: Some(e.to_string()),
                directories: DirectoryNode::empty(),
            },
        }
    }
}

/// `POST /upload` success body.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: &'static str,
}

impl UploadResponse {
    pub fn saved() -> Self {
        Self {
            success: true,
            message: messages::FILE_SAVED,
        }
    }
}

/// 401 body.
#[derive(Debug, Clone, Serialize)]
pub struct UnauthorizedResponse {
    pub error: &'static str,
    /// The configured token, when echoing is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Headers of the rejected request.
    pub got: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_response_shapes() {
        assert_eq!(
            serde_json::to_value(OperationResponse::ok()).unwrap(),
            json!({ "success": true, "error": "" })
        );

        let failed: OperationResponse = Err(DavError::NotFound).into();
        assert_eq!(
            serde_json::to_value(failed).unwrap(),
            json!({ "success": false, "error": "Plik nie istnieje." })
        );
    }

    #[test]
    fn test_list_failure_has_empty_tree() {
        let response: ListResponse = Err(DavError::Parse("bad".to_string())).into();
        let value = serde_json::to_value(response).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["directories"], json!({}));
        assert!(value["error"].as_str().unwrap().contains("bad"));
    }

    #[test]
    fn test_list_success_omits_error() {
        let response: ListResponse = Ok(DirectoryNode::empty()).into();
        let value = serde_json::to_value(response).unwrap();

        assert_eq!(value, json!({ "success": true, "directories": {} }));
    }
}
