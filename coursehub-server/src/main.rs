//! CourseHub HTTP Server binary

use anyhow::Context;
use coursehub_core::{CourseHub, CourseHubConfig};
use coursehub_server::{logging, AppState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging(logging::LogFormat::from_env())?;

    info!("Starting CourseHub server v{}", env!("CARGO_PKG_VERSION"));

    // Initialize Prometheus metrics
    coursehub_server::metrics::init_prometheus()?;
    coursehub_server::metrics::init_metrics();

    let config = CourseHubConfig::from_env().context("Invalid configuration")?;

    // An unreadable or malformed catalog stops the server here.
    let hub = CourseHub::from_config(&config).with_context(|| {
        format!("Failed to load catalog {}", config.courses_file.display())
    })?;
    let hub = Arc::new(hub);
    coursehub_server::metrics::update_hub_metrics(hub.stats());

    let state = AppState::new(Arc::clone(&hub));
    let _persist_watch = state.watch_persistence();

    let app = coursehub_server::router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Backend server listening on http://{}", listener.local_addr()?);

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, shutting down gracefully...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Flushing pending catalog writes...");
    hub.flush().await;

    info!("Server shutdown complete");
    Ok(())
}
