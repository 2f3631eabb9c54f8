//! Beacon: a minimal HTTP service with OpenTelemetry log correlation.
//!
//! # Usage
//!
//! ```bash
//! beacon --port 8080 --log-level info --otel-endpoint http://localhost:4317
//! ```
//!
//! Environment variables can also be used:
//! - `BEACON_PORT`: Port to listen on
//! - `BEACON_PROCESS_DELAY_MS`: Simulated work duration of `/process`
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: Collector receiving exported spans
//! - `RUST_LOG`: Log level (trace, debug, info, warn, error)

use anyhow::Context;
use beacon::config::Config;
use beacon::observability::TelemetryProvider;
use beacon::server::{run_server, shutdown_signal};
use tokio::sync::watch;

/// Print startup banner with version and configuration.
fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        r#"
  Beacon v{} - HTTP telemetry demo

  Configuration:
    Address:        {}:{}
    Service:        {}
    OTLP Endpoint:  {}
    Process Delay:  {} ms
    Log Level:      {}

  Press Ctrl+C to shutdown gracefully.
"#,
        version,
        config.host,
        config.port,
        config.service_name,
        config.otel_endpoint.as_deref().unwrap_or("(none)"),
        config.process_delay_ms,
        config.log_level
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse configuration from CLI arguments and environment
    let config = Config::parse_args();

    // Build the telemetry provider; the server installs the log bridge
    let provider =
        TelemetryProvider::from_config(&config).context("failed to build telemetry provider")?;

    print_banner(&config);

    // Create shutdown signal channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Spawn signal handler task
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    // Run the server
    let served = run_server(config, &provider, shutdown_rx).await;

    // Flush buffered spans even when serving failed
    if let Err(e) = provider.shutdown() {
        tracing::warn!(error = %e, "Telemetry provider did not shut down cleanly");
    }

    served.context("server failed")?;

    tracing::info!("Beacon shutdown complete");
    Ok(())
}
