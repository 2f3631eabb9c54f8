//! Process-wide telemetry provider.
//!
//! Owns the OpenTelemetry tracer provider, the W3C trace-context propagator
//! and the service name. Built once at startup and handed explicitly to the
//! bridge installer and the HTTP request span factory.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::{Config as TraceConfig, Tracer, TracerProvider};
use opentelemetry_sdk::Resource;
use std::sync::Arc;

use super::TelemetryError;
use crate::config::Config;

/// Telemetry provider shared by the bridge and request spans.
///
/// Cloning is cheap; every clone refers to the same SDK provider.
#[derive(Clone, Debug)]
pub struct TelemetryProvider {
    service_name: String,
    tracer_provider: TracerProvider,
    propagator: Arc<TraceContextPropagator>,
}

impl TelemetryProvider {
    /// Build the provider from application configuration.
    ///
    /// With an OTLP endpoint configured spans are batch-exported over gRPC.
    /// Without one, spans are still created (so trace ids are valid and
    /// correlate logs) but never leave the process.
    ///
    /// Must be called from within a Tokio runtime when an endpoint is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the OTLP exporter cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self, TelemetryError> {
        match config.otel_endpoint.as_deref() {
            Some(endpoint) => Self::with_otlp_endpoint(&config.service_name, endpoint),
            None => Ok(Self::in_process(&config.service_name)),
        }
    }

    /// Provider exporting spans to an OTLP collector.
    pub fn with_otlp_endpoint(service_name: &str, endpoint: &str) -> Result<Self, TelemetryError> {
        use opentelemetry_otlp::{Protocol, WithExportConfig};

        let exporter = opentelemetry_otlp::new_exporter()
            .tonic()
            .with_endpoint(endpoint)
            .with_protocol(Protocol::Grpc)
            .build_span_exporter()?;

        let tracer_provider = TracerProvider::builder()
            .with_config(trace_config(service_name))
            .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
            .build();

        Ok(Self::from_parts(service_name, tracer_provider))
    }

    /// Provider with no exporter attached.
    pub fn in_process(service_name: &str) -> Self {
        let tracer_provider = TracerProvider::builder()
            .with_config(trace_config(service_name))
            .build();

        Self::from_parts(service_name, tracer_provider)
    }

    fn from_parts(service_name: &str, tracer_provider: TracerProvider) -> Self {
        Self {
            service_name: service_name.to_string(),
            tracer_provider,
            propagator: Arc::new(TraceContextPropagator::new()),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn tracer_provider(&self) -> &TracerProvider {
        &self.tracer_provider
    }

    /// Propagator used to extract inbound trace context.
    pub fn propagator(&self) -> Arc<TraceContextPropagator> {
        Arc::clone(&self.propagator)
    }

    /// Tracer named after the service.
    pub fn tracer(&self) -> Tracer {
        self.tracer_provider.tracer(self.service_name.clone())
    }

    /// Flush pending spans and stop the exporter.
    ///
    /// # Errors
    ///
    /// Returns an error if the exporter fails to shut down cleanly.
    pub fn shutdown(&self) -> Result<(), TelemetryError> {
        Ok(self.tracer_provider.shutdown()?)
    }
}

fn trace_config(service_name: &str) -> TraceConfig {
    TraceConfig::default().with_resource(Resource::new(vec![KeyValue::new(
        "service.name",
        service_name.to_string(),
    )]))
}
