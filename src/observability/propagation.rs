//! Inbound W3C trace-context extraction from HTTP headers.

use axum::http::HeaderMap;
use opentelemetry::propagation::{Extractor, TextMapPropagator};
use opentelemetry::Context;

/// Read-only view of request headers for OpenTelemetry propagators.
pub struct HeaderExtractor<'a>(pub &'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|name| name.as_str()).collect()
    }
}

/// Extract the remote parent context carried by `headers`.
///
/// Returns an empty context when no valid `traceparent` is present.
pub fn extract_context<P>(propagator: &P, headers: &HeaderMap) -> Context
where
    P: TextMapPropagator + ?Sized,
{
    propagator.extract(&HeaderExtractor(headers))
}
