//! HTTP surface of Beacon.
//!
//! Routes:
//! - `GET /` - home
//! - `GET /welcome/{name}` - greeting
//! - `GET /process` - simulated slow work
//! - `POST /payment` - payment intake

pub mod handlers;
pub mod payment;
pub mod trace;

pub use payment::Payment;

use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::observability::TelemetryProvider;
use trace::RequestSpan;

/// State shared by all handlers. Read-only.
#[derive(Clone, Debug)]
pub struct AppState {
    /// How long `/process` waits before answering.
    pub process_delay: Duration,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            process_delay: config.process_delay(),
        }
    }
}

/// Create the application router.
///
/// Every request is wrapped in a span parented on its inbound trace context.
pub fn router(state: AppState, provider: &TelemetryProvider) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/welcome/", get(handlers::welcome_empty))
        .route("/welcome/{name}", get(handlers::welcome))
        .route("/process", get(handlers::process))
        .route("/payment", post(handlers::payment))
        .layer(TraceLayer::new_for_http().make_span_with(RequestSpan::new(provider)))
        .with_state(state)
}
