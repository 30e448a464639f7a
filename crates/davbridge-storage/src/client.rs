//! WebDAV client.
//!
//! Each public operation sends exactly one request with its own total
//! timeout and never retries.

use std::path::Path;
use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_LENGTH, HeaderValue};
use reqwest::{Body, Client, Method, RequestBuilder, Response, StatusCode};
use tokio_util::io::ReaderStream;
use url::Url;

use davbridge_core::config::webdav::{WebDavConfig, WebDavTimeouts};
use davbridge_core::error::AppError;
use davbridge_core::result::AppResult;

use crate::error::DavError;
use crate::multistatus::parse_hrefs;
use crate::path::{decode, encode_path, encode_segment, trim_slashes};
use crate::tree::{DirectoryNode, build_tree};

/// `Depth` header value requesting the whole subtree.
pub const DEPTH_INFINITY: &str = "infinity";

/// WebDAV verbs used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DavMethod {
    Mkcol,
    Propfind,
    Put,
    Delete,
}

impl DavMethod {
    fn to_method(self) -> Result<Method, DavError> {
        match self {
            Self::Mkcol => Method::from_bytes(b"MKCOL")
                .map_err(|e| DavError::InvalidRequest(e.to_string())),
            Self::Propfind => Method::from_bytes(b"PROPFIND")
                .map_err(|e| DavError::InvalidRequest(e.to_string())),
            Self::Put => Ok(Method::PUT),
            Self::Delete => Ok(Method::DELETE),
        }
    }
}

/// Client for one WebDAV container.
///
/// Cloning is cheap: the underlying `reqwest::Client` is a shared pool.
#[derive(Debug, Clone)]
pub struct WebDavClient {
    http: Client,
    base_url: String,
    base_path: String,
    credentials: Option<(String, Option<String>)>,
    timeouts: WebDavTimeouts,
}

impl WebDavClient {
    /// Create a client from configuration.
    ///
    /// Fails when the base URL is empty or not an absolute URL.
    pub fn new(config: &WebDavConfig) -> AppResult<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let parsed = Url::parse(&base_url).map_err(|e| {
            AppError::configuration(format!("Invalid WebDAV base URL '{base_url}': {e}"))
        })?;
        let base_path = decode(trim_slashes(parsed.path()));

        let http = Client::builder()
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        let credentials = config
            .username
            .as_ref()
            .filter(|user| !user.is_empty())
            .map(|user| (user.clone(), config.password.clone()));

        Ok(Self {
            http,
            base_url,
            base_path,
            credentials,
            timeouts: config.timeouts.clone(),
        })
    }

    /// Base URL, always ending with exactly one `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create `directory` with `MKCOL`.
    ///
    /// Only `201 Created` is success; an existing collection (`405`) is a
    /// failure like any other status.
    pub async fn mkdir(&self, directory: &str) -> Result<(), DavError> {
        let url = self.collection_url(directory);
        let request = self.request(DavMethod::Mkcol, &url, self.timeouts.mkdir())?;
        let response = self.execute(request).await?;

        match response.status() {
            StatusCode::CREATED => Ok(()),
            status => Err(DavError::Protocol {
                method: DavMethod::Mkcol,
                status,
            }),
        }
    }

    /// Upload `local_path` as `directory/file_name` with `PUT`.
    ///
    /// The file is streamed from disk with an explicit `Content-Length`.
    pub async fn save_file(
        &self,
        local_path: &Path,
        directory: &str,
        file_name: &str,
    ) -> Result<(), DavError> {
        let local_error = |source| DavError::LocalFile {
            path: local_path.to_path_buf(),
            source,
        };

        let file = tokio::fs::File::open(local_path).await.map_err(local_error)?;
        let size = file.metadata().await.map_err(local_error)?.len();

        let url = self.file_url(directory, file_name);
        let request = self
            .request(DavMethod::Put, &url, self.timeouts.upload())?
            .header(CONTENT_LENGTH, HeaderValue::from(size))
            .body(Body::wrap_stream(ReaderStream::new(file)));

        tracing::debug!(url = %url, size, "Uploading file to WebDAV");

        let response = self.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DavError::Protocol {
                method: DavMethod::Put,
                status,
            })
        }
    }

    /// Delete the resource at `path` (encoded as one segment).
    pub async fn delete_file(&self, path: &str) -> Result<(), DavError> {
        let url = self.collection_url(path);
        let request = self.request(DavMethod::Delete, &url, self.timeouts.delete())?;
        let response = self.execute(request).await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(DavError::NotFound),
            status => Err(DavError::Protocol {
                method: DavMethod::Delete,
                status,
            }),
        }
    }

    /// List `directory` with `PROPFIND` and the given `Depth` header.
    ///
    /// `depth` is passed through verbatim (`0`, `1`, ..., `infinity`).
    pub async fn list_directories(
        &self,
        directory: &str,
        depth: &str,
    ) -> Result<DirectoryNode, DavError> {
        let depth = HeaderValue::from_str(depth)
            .map_err(|e| DavError::InvalidRequest(format!("Depth: {e}")))?;

        let url = self.collection_url(directory);
        let request = self
            .request(DavMethod::Propfind, &url, self.timeouts.list())?
            .header("Depth", depth);
        let response = self.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DavError::Protocol {
                method: DavMethod::Propfind,
                status,
            });
        }

        let body = response.text().await?;
        let hrefs = parse_hrefs(&body)?;

        tracing::debug!(
            directory = %directory,
            entries = hrefs.len(),
            "Parsed PROPFIND response"
        );

        Ok(build_tree(
            hrefs.iter().map(String::as_str),
            directory,
            &self.base_path,
        ))
    }

    /// Probe `directory` with a `Depth: 0` `PROPFIND`.
    ///
    /// `true` only for `207 Multi-Status`; every other outcome, transport
    /// failures included, is `false`.
    pub async fn directory_exists(&self, directory: &str) -> bool {
        let url = self.collection_url(directory);
        let request = match self.request(DavMethod::Propfind, &url, self.timeouts.exists()) {
            Ok(request) => request.header("Depth", HeaderValue::from_static("0")),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Could not build existence probe");
                return false;
            }
        };

        match self.execute(request).await {
            Ok(response) => response.status() == StatusCode::MULTI_STATUS,
            Err(_) => false,
        }
    }

    /// `base + encode(segment)` with the whole value as one segment.
    fn collection_url(&self, value: &str) -> String {
        format!("{}{}", self.base_url, encode_segment(value))
    }

    /// `base + encode(dir segments) + / + encode(file_name)`.
    fn file_url(&self, directory: &str, file_name: &str) -> String {
        let mut path = encode_path(directory);
        if !path.is_empty() {
            path.push('/');
        }
        path.push_str(&encode_segment(file_name));
        format!("{}{}", self.base_url, path)
    }

    fn request(
        &self,
        method: DavMethod,
        url: &str,
        timeout: Duration,
    ) -> Result<RequestBuilder, DavError> {
        let builder = self.http.request(method.to_method()?, url).timeout(timeout);

        Ok(match &self.credentials {
            Some((user, password)) => builder.basic_auth(user, password.as_ref()),
            None => builder,
        })
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, DavError> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        let started = Instant::now();

        match self.http.execute(request).await {
            Ok(response) => {
                tracing::debug!(
                    method = %method,
                    url = %url,
                    status = response.status().as_u16(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "WebDAV request"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(
                    method = %method,
                    url = %url,
                    duration_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "WebDAV request failed"
                );
                Err(e.into())
            }
        }
    }
}

/// Trim trailing slashes and append exactly one.
fn normalize_base_url(raw: &str) -> AppResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AppError::configuration("WebDAV base URL is empty"));
    }
    Ok(format!("{trimmed}/"))
}
