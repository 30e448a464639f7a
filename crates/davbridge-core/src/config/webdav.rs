//! Remote WebDAV container configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the WebDAV server every request is forwarded to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebDavConfig {
    /// Root URL of the WebDAV container. Required.
    #[serde(default)]
    pub base_url: String,
    /// Optional HTTP basic auth user.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional HTTP basic auth password.
    #[serde(default)]
    pub password: Option<String>,
    /// Per-operation timeouts.
    #[serde(default)]
    pub timeouts: WebDavTimeouts,
}

/// Timeouts (in seconds) applied to outbound WebDAV calls.
///
/// `connect_seconds` bounds connection establishment for every call; the
/// others bound the whole exchange of one operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebDavTimeouts {
    /// Connection establishment.
    #[serde(default = "default_connect")]
    pub connect_seconds: u64,
    /// `MKCOL`.
    #[serde(default = "default_mkdir")]
    pub mkdir_seconds: u64,
    /// `PUT` of an uploaded file.
    #[serde(default = "default_upload")]
    pub upload_seconds: u64,
    /// `DELETE`.
    #[serde(default = "default_delete")]
    pub delete_seconds: u64,
    /// `PROPFIND` listing.
    #[serde(default = "default_list")]
    pub list_seconds: u64,
    /// `PROPFIND` existence probe.
    #[serde(default = "default_exists")]
    pub exists_seconds: u64,
}

impl WebDavTimeouts {
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_seconds)
    }

    pub fn mkdir(&self) -> Duration {
        Duration::from_secs(self.mkdir_seconds)
    }

    pub fn upload(&self) -> Duration {
        Duration::from_secs(self.upload_seconds)
    }

    pub fn delete(&self) -> Duration {
        Duration::from_secs(self.delete_seconds)
    }

    pub fn list(&self) -> Duration {
        Duration::from_secs(self.list_seconds)
    }

    pub fn exists(&self) -> Duration {
        Duration::from_secs(self.exists_seconds)
    }
}

impl Default for WebDavTimeouts {
    fn default() -> Self {
        Self {
            connect_seconds: default_connect(),
            mkdir_seconds: default_mkdir(),
            upload_seconds: default_upload(),
            delete_seconds: default_delete(),
            list_seconds: default_list(),
            exists_seconds: default_exists(),
        }
    }
}

fn default_connect() -> u64 {
    10
}

fn default_mkdir() -> u64 {
    30
}

fn default_upload() -> u64 {
    300
}

fn default_delete() -> u64 {
    60
}

fn default_list() -> u64 {
    30
}

fn default_exists() -> u64 {
    20
}
