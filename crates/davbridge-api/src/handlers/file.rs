//! File handlers: upload and delete.

use axum::Json;
use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use bytes::Bytes;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

use davbridge_core::error::{AppError, ErrorKind};

use crate::dto::request::{DeleteRequest, parse_json_body};
use crate::dto::response::{OperationResponse, UploadResponse};
use crate::error::ApiError;
use crate::messages;
use crate::state::AppState;

/// A multipart file field spooled to disk.
///
/// The temporary file is removed when this is dropped.
struct SpooledUpload {
    file: NamedTempFile,
    file_name: String,
    size: u64,
}

/// POST /upload (multipart: `file`, `directory`)
///
/// The file part is written to a temporary file and streamed to WebDAV from
/// there. Any client failure is reported as 500.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Upload is not a multipart request");
        ApiError::bad_request(messages::MISSING_FILE)
    })?;

    let mut directory = String::new();
    let mut upload: Option<SpooledUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" if upload.is_none() => {
                let Some(file_name) = field.file_name().map(base_name) else {
                    continue;
                };
                if file_name.is_empty() {
                    continue;
                }
                upload = Some(spool(field, file_name).await?);
            }
            "directory" => {
                directory = field.text().await.map_err(multipart_error)?;
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| ApiError::bad_request(messages::MISSING_FILE))?;

    tracing::info!(
        directory = %directory,
        file_name = %upload.file_name,
        size = upload.size,
        "Uploading file"
    );

    state
        .webdav
        .save_file(upload.file.path(), &directory, &upload.file_name)
        .await
        .map_err(|e| {
            tracing::warn!(file_name = %upload.file_name, error = %e, "PUT failed");
            ApiError::upload_failed(e)
        })?;

    Ok(Json(UploadResponse::saved()))
}

/// DELETE /delete
pub async fn delete_file(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<OperationResponse>, ApiError> {
    let req: DeleteRequest = parse_json_body(&body);
    if req.path.is_empty() {
        return Err(ApiError::bad_request(messages::MISSING_PATH));
    }

    let result = state.webdav.delete_file(&req.path).await;
    if let Err(e) = &result {
        tracing::warn!(path = %req.path, error = %e, "DELETE failed");
    }

    Ok(Json(result.into()))
}

/// Write a multipart field to a fresh temporary file chunk by chunk.
async fn spool(mut field: Field<'_>, file_name: String) -> Result<SpooledUpload, ApiError> {
    let file = NamedTempFile::new().map_err(spool_error)?;
    let mut writer = tokio::fs::File::from_std(file.reopen().map_err(spool_error)?);
    let mut size = 0u64;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        writer.write_all(&chunk).await.map_err(spool_error)?;
        size += chunk.len() as u64;
    }
    writer.flush().await.map_err(spool_error)?;

    Ok(SpooledUpload {
        file,
        file_name,
        size,
    })
}

/// Last component of a client-supplied file name, ignoring trailing separators.
fn base_name(name: &str) -> String {
    name.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .to_string()
}

/// A body that breaks off mid-way never delivered a usable file.
fn multipart_error(err: MultipartError) -> ApiError {
    tracing::debug!(error = %err, "Malformed multipart body");
    ApiError::bad_request(messages::MISSING_FILE)
}

fn spool_error(err: std::io::Error) -> ApiError {
    AppError::with_source(
        ErrorKind::Internal,
        format!("Nie udało się zapisać pliku tymczasowego: {err}"),
        err,
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("umowa.pdf"), "umowa.pdf");
        assert_eq!(base_name("../../etc/passwd"), "passwd");
        assert_eq!(base_name("C:\\Users\\jan\\raport.xlsx"), "raport.xlsx");
        assert_eq!(base_name("katalog/"), "katalog");
        assert_eq!(base_name("a\\raport.txt\\"), "raport.txt");
        assert_eq!(base_name("/"), "");
    }
}
