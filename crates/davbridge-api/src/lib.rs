//! # davbridge-api
//!
//! HTTP API layer for DavBridge built on Axum.
//!
//! Exposes the five bridge endpoints (`/mkdir`, `/exists`, `/list`,
//! `/upload`, `/delete`), the bearer-token check, request logging, CORS and
//! the JSON envelopes.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod messages;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
