//! Directory handlers: create, probe and list.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use bytes::Bytes;

use davbridge_storage::DEPTH_INFINITY;

use crate::dto::request::{DirectoryQuery, MkdirRequest, parse_json_body};
use crate::dto::response::{ListResponse, OperationResponse};
use crate::error::ApiError;
use crate::messages;
use crate::state::AppState;

/// POST /mkdir
///
/// An existing directory is reported as a soft failure (200, `success: false`).
pub async fn mkdir(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<OperationResponse>, ApiError> {
    let req: MkdirRequest = parse_json_body(&body);
    if req.directory.is_empty() {
        return Err(ApiError::bad_request(messages::MISSING_DIRECTORY));
    }

    if state.webdav.directory_exists(&req.directory).await {
        tracing::info!(directory = %req.directory, "Directory already exists");
        return Ok(Json(OperationResponse::failure(messages::DIRECTORY_EXISTS)));
    }

    let result = state.webdav.mkdir(&req.directory).await;
    if let Err(e) = &result {
        tracing::warn!(directory = %req.directory, error = %e, "MKCOL failed");
    }

    Ok(Json(result.into()))
}

/// GET /exists?directory=...
pub async fn exists(
    State(state): State<AppState>,
    query: Result<Query<DirectoryQuery>, QueryRejection>,
) -> Result<Json<bool>, ApiError> {
    let query = directory_query(query)?;
    Ok(Json(state.webdav.directory_exists(&query.directory).await))
}

/// GET /list?directory=...&depth=...
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<DirectoryQuery>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError> {
    let query = directory_query(query)?;
    let depth = query.depth.as_deref().unwrap_or(DEPTH_INFINITY);

    let result = state.webdav.list_directories(&query.directory, depth).await;
    if let Err(e) = &result {
        tracing::warn!(directory = %query.directory, depth, error = %e, "PROPFIND failed");
    }

    Ok(Json(result.into()))
}

/// An unparseable query is treated like one without `directory`.
fn directory_query(
    query: Result<Query<DirectoryQuery>, QueryRejection>,
) -> Result<DirectoryQuery, ApiError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    if query.directory.is_empty() {
        return Err(ApiError::bad_request(messages::MISSING_DIRECTORY));
    }
    Ok(query)
}
