//! # davbridge-storage
//!
//! WebDAV client for DavBridge. Every public operation issues exactly one
//! WebDAV request (`MKCOL`, `PROPFIND`, `PUT` or `DELETE`) against the
//! configured container and classifies the response.

pub mod client;
pub mod error;
pub mod multistatus;
pub mod path;
pub mod tree;

pub use client::{DEPTH_INFINITY, DavMethod, WebDavClient};
pub use error::DavError;
pub use tree::DirectoryNode;
