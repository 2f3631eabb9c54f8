//! Request handlers.
//!
//! Each handler is stateless; the only shared input is the read-only
//! simulated work duration in [`AppState`].

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::payment::Payment;
use super::AppState;

/// Handle GET /
pub async fn home() -> &'static str {
    tracing::info!("Home requested");
    "home"
}

/// Handle GET /welcome/{name}
pub async fn welcome(Path(name): Path<String>) -> String {
    greet(&name)
}

/// Handle GET /welcome/ (empty name)
pub async fn welcome_empty() -> String {
    greet("")
}

fn greet(name: &str) -> String {
    tracing::info!(name = %name, "Welcome requested");
    format!("welcome {name}")
}

/// Handle GET /process
///
/// Simulates a slow downstream dependency with a non-blocking wait.
pub async fn process(State(state): State<AppState>) -> &'static str {
    tracing::info!(delay = ?state.process_delay, "Process started");
    tokio::time::sleep(state.process_delay).await;
    tracing::info!("Process completed");
    "processed"
}

/// Handle POST /payment
pub async fn payment(body: Result<Json<Payment>, JsonRejection>) -> Response {
    let Json(payment) = match body {
        Ok(body) => body,
        Err(rejection) => {
            let status = rejection_status(&rejection);
            tracing::warn!(
                status = status.as_u16(),
                error = %rejection.body_text(),
                "Rejected request body"
            );
            return (status, rejection.body_text()).into_response();
        }
    };

    tracing::info!(payment = %payment, "Payment received");
    "payment successful".into_response()
}

/// Invalid JSON and non-object JSON are client errors. Every other rejection
/// (content type, body size, body read) keeps axum's status.
fn rejection_status(rejection: &JsonRejection) -> StatusCode {
    match rejection {
        JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
            StatusCode::BAD_REQUEST
        }
        _ => rejection.status(),
    }
}
