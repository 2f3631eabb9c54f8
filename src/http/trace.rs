//! Per-request spans carrying trace correlation ids.

use axum::http::Request;
use opentelemetry::trace::TraceContextExt;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use std::sync::Arc;
use tower_http::trace::MakeSpan;
use tracing::field::{display, Empty};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::observability::propagation::extract_context;
use crate::observability::TelemetryProvider;

/// Builds the `request` span for every inbound request.
///
/// The span's OpenTelemetry parent comes from the request's `traceparent`
/// header, and its `trace_id`/`span_id` fields are filled in so every log
/// line emitted while handling the request can be correlated.
#[derive(Clone, Debug)]
pub struct RequestSpan {
    propagator: Arc<TraceContextPropagator>,
}

impl RequestSpan {
    pub fn new(provider: &TelemetryProvider) -> Self {
        Self {
            propagator: provider.propagator(),
        }
    }
}

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let span = tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            trace_id = Empty,
            span_id = Empty,
        );

        let parent = extract_context(self.propagator.as_ref(), request.headers());
        span.set_parent(parent);

        // Only resolvable when an OpenTelemetry layer is part of the subscriber.
        let cx = span.context();
        let otel_span = cx.span();
        let span_context = otel_span.span_context();
        if span_context.is_valid() {
            span.record("trace_id", display(span_context.trace_id()));
            span.record("span_id", display(span_context.span_id()));
        }

        span
    }
}
