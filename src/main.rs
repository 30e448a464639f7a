//! DavBridge server: HTTP-to-WebDAV bridge.
//!
//! Loads configuration, initializes logging, builds the WebDAV client and
//! router, then serves until Ctrl+C or SIGTERM.

use tracing_subscriber::{EnvFilter, fmt};

use davbridge_api::{AppState, build_router};
use davbridge_core::config::AppConfig;
use davbridge_core::error::AppError;
use davbridge_storage::WebDavClient;

#[tokio::main]
async fn main() {
    // A missing .env is not an error.
    dotenvy::dotenv().ok();

    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration for the environment named by `DAVBRIDGE_ENV`.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("DAVBRIDGE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DavBridge v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.echo_expected_token {
        tracing::warn!(
            "auth.echo_expected_token is enabled: 401 responses disclose the configured token"
        );
    }

    let webdav = WebDavClient::new(&config.webdav)?;
    tracing::info!(base_url = %webdav.base_url(), "WebDAV client ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(AppState::new(config, webdav));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("DavBridge listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("DavBridge shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
