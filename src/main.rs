//! Lost & Found Cache - admin server
//!
//! Hosts the application cache registry and exposes its metrics and
//! maintenance operations over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lostfound_cache::api::create_router;
use lostfound_cache::tasks::spawn_metrics_report_task;
use lostfound_cache::{AppState, CacheRegistry, Config};

/// Main entry point for the cache admin server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load server configuration from environment variables
/// 3. Initialize the cache registry (starts per-cache cleanup tasks)
/// 4. Start the periodic metrics report
/// 5. Serve the admin API on the configured port
/// 6. On SIGINT/SIGTERM, stop the report and destroy the registry
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lostfound_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Lost & Found cache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, metrics_log_interval={}s",
        config.server_port, config.metrics_log_interval
    );

    let registry = Arc::new(CacheRegistry::init().context("failed to initialize caches")?);

    let report_handle = config
        .metrics_report_enabled()
        .then(|| spawn_metrics_report_task(registry.clone(), config.metrics_log_interval));

    let app = create_router(AppState::new(registry.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(handle) = report_handle {
        handle.abort();
    }
    registry.destroy();

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
