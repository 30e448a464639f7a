//! Route definitions for the DavBridge HTTP API.
//!
//! Five fixed endpoints at the root. A known path hit with the wrong method
//! falls through to the same 404 as an unknown path.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Layers, innermost first: token check, body limit, trace, CORS, request
/// logging. CORS sits outside the token check so preflights are answered
/// without credentials.
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.server.max_upload_size_bytes)
        .unwrap_or(usize::MAX);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(directory_routes())
        .merge(file_routes())
        .fallback(handlers::unknown_endpoint)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_token,
        ))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// mkdir, exists, list
fn directory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/mkdir",
            post(handlers::directory::mkdir).fallback(handlers::unknown_endpoint),
        )
        .route(
            "/exists",
            get(handlers::directory::exists).fallback(handlers::unknown_endpoint),
        )
        .route(
            "/list",
            get(handlers::directory::list).fallback(handlers::unknown_endpoint),
        )
}

/// upload, delete
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(handlers::file::upload).fallback(handlers::unknown_endpoint),
        )
        .route(
            "/delete",
            delete(handlers::file::delete_file).fallback(handlers::unknown_endpoint),
        )
}
