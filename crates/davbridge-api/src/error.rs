//! Maps `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use davbridge_core::error::{AppError, ErrorKind};
use davbridge_storage::DavError;

use crate::dto::response::OperationResponse;

/// An `AppError` bound to the HTTP status it is reported with.
///
/// The body is always the `{"success": false, "error": ...}` envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    inner: AppError,
}

impl ApiError {
    /// Report `inner` with an explicit status.
    pub fn with_status(status: StatusCode, inner: impl Into<AppError>) -> Self {
        Self {
            status,
            inner: inner.into(),
        }
    }

    /// 400 with the given message.
    pub fn bad_request(message: &str) -> Self {
        AppError::validation(message).into()
    }

    /// 404 for a method/path pair that has no handler.
    pub fn unknown_endpoint() -> Self {
        AppError::not_found(crate::messages::UNKNOWN_ENDPOINT).into()
    }

    /// A failed upload, always reported as 500.
    pub fn upload_failed(err: DavError) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}

impl From<AppError> for ApiError {
    fn from(inner: AppError) -> Self {
        let status = match inner.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, inner }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                kind = %self.inner.kind,
                error = %self.inner.message,
                "Request failed"
            );
        }

        let body = OperationResponse::failure(self.inner.message);
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_status_follows_kind() {
        let (status, body) = render(ApiError::bad_request("x")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "success": false, "error": "x" }));

        let (status, _) = render(ApiError::unknown_endpoint()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = render(AppError::internal("boom").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_upload_failure_keeps_client_message() {
        let (status, body) = render(ApiError::upload_failed(DavError::NotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "success": false, "error": "Plik nie istnieje." }));
    }
}
