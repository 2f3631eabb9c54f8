//! HTTP server setup and lifecycle.
//!
//! Configures the axum server with:
//! - The telemetry bridge, installed before the listener binds
//! - The Beacon router
//! - Graceful shutdown support

use axum::Router;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::config::Config;
use crate::http::{router, AppState};
use crate::observability::{bridge, BridgeSettings, TelemetryError, TelemetryProvider};

/// Error type for server startup and serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Telemetry setup failed: {0}")]
    Telemetry(#[from] TelemetryError),
}

/// Run the Beacon HTTP server.
///
/// # Arguments
///
/// * `config` - Server configuration
/// * `provider` - Telemetry provider bound to the log pipeline
/// * `shutdown_rx` - Receiver for shutdown signal
///
/// # Returns
///
/// Returns when the server has shut down.
pub async fn run_server(
    config: Config,
    provider: &TelemetryProvider,
    shutdown_rx: watch::Receiver<bool>,
) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // Records emitted before this point carry no trace context
    bridge::install(provider, &BridgeSettings::from_config(&config))?;

    let app = router(AppState::from_config(&config), provider);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        process_delay_ms = config.process_delay_ms,
        "Starting Beacon HTTP server"
    );

    serve(listener, app, shutdown_rx).await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Serve `app` on an already bound listener until shutdown is signalled.
///
/// In-flight requests are allowed to finish.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Result<(), ServerError> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            // Wait for shutdown signal
            let _ = shutdown_rx.changed().await;
            tracing::info!("Shutdown signal received, stopping server");
        })
        .await?;

    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or, on unix, SIGTERM.
///
/// A signal whose handler cannot be installed is logged and ignored; it
/// never triggers shutdown on its own.
pub async fn shutdown_signal() {
    let ctrl_c = on_signal("SIGINT", tokio::signal::ctrl_c());

    #[cfg(unix)]
    let terminate = on_signal("SIGTERM", async {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate())?.recv().await;
        Ok::<(), io::Error>(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), initiating shutdown...");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown...");
        }
    }
}

/// Resolve once `listener` reports its signal; stay pending if it fails.
async fn on_signal<F>(name: &'static str, listener: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = listener.await {
        tracing::warn!(signal = name, error = %e, "Failed to listen for signal, ignoring it");
        std::future::pending::<()>().await;
    }
}
