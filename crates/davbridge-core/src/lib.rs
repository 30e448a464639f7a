//! # davbridge-core
//!
//! Core crate for DavBridge. Contains the configuration schema, the unified
//! error system and the shared result alias.
//!
//! This crate has **no** internal dependencies on other DavBridge crates.

pub mod config;
pub mod error;
pub mod result;

pub use config::AppConfig;
pub use error::AppError;
pub use result::AppResult;
