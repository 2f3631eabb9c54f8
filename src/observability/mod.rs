//! OpenTelemetry observability infrastructure.
//!
//! Provides:
//! - The process-wide telemetry provider (tracer + propagator)
//! - The one-time bridge wiring `tracing` records to OpenTelemetry
//! - W3C trace-context extraction for inbound requests

pub mod bridge;
pub mod propagation;
pub mod provider;

pub use bridge::{install, BridgeSettings};
pub use provider::TelemetryProvider;

use thiserror::Error;

/// Error type for telemetry setup and teardown.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Trace pipeline error: {0}")]
    Trace(#[from] opentelemetry::trace::TraceError),

    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Failed to install global subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
