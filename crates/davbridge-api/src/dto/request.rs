//! Request DTOs.
//!
//! JSON bodies are parsed leniently: a missing, malformed or mistyped body
//! yields the default value, which the handlers then reject as missing input.

use bytes::Bytes;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// `POST /mkdir` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MkdirRequest {
    /// Remote directory to create.
    #[serde(default)]
    pub directory: String,
}

/// `DELETE /delete` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteRequest {
    /// Remote path of the file to delete.
    #[serde(default)]
    pub path: String,
}

/// Query string of `GET /exists` and `GET /list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryQuery {
    #[serde(default)]
    pub directory: String,
    /// `Depth` for `/list`; absent means the whole subtree.
    pub depth: Option<String>,
}

/// Parse a JSON body, falling back to `T::default()`.
pub fn parse_json_body<T>(body: &Bytes) -> T
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unparseable JSON body");
            T::default()
        }
    }
}
