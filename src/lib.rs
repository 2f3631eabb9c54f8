//! Beacon: a minimal HTTP service with OpenTelemetry log correlation.
//!
//! A handful of REST endpoints emit structured log records. A bridge
//! installed once at startup binds the `tracing` pipeline to an
//! OpenTelemetry provider, so every record emitted while serving a request
//! carries the request's trace and span ids.
//!
//! # Modules
//!
//! - [`config`]: CLI and environment configuration
//! - [`http`]: Router, handlers and request spans
//! - [`observability`]: Telemetry provider and log bridge
//! - [`server`]: HTTP server setup

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions, // observability::TelemetryError is fine
    clippy::must_use_candidate,      // Not all functions need #[must_use]
    clippy::missing_errors_doc,      // Error docs can be verbose
    clippy::missing_panics_doc       // Panic docs can be verbose
)]

pub mod config;
pub mod http;
pub mod observability;
pub mod server;
