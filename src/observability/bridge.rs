//! Bridge between the `tracing` log pipeline and OpenTelemetry.
//!
//! Configures structured logging with:
//! - Environment-style level filter
//! - Console output as text or JSON
//! - An OpenTelemetry layer so spans (and the records emitted inside them)
//!   carry trace/span identifiers and are exported through the provider

use opentelemetry::global;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::Tracer;
use std::io::IsTerminal;
use std::sync::{Mutex, PoisonError};
use tracing::Subscriber;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::provider::TelemetryProvider;
use super::TelemetryError;
use crate::config::{Config, LogFormat};

/// Set once the bridge owns the global subscriber.
static INSTALLED: Mutex<bool> = Mutex::new(false);

/// Console logging options applied by [`install`].
#[derive(Debug, Clone)]
pub struct BridgeSettings {
    /// `EnvFilter` directives, e.g. `info` or `info,beacon=debug`
    pub filter: String,
    pub format: LogFormat,
}

impl BridgeSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            filter: config.log_level.clone(),
            format: config.log_format,
        }
    }
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            filter: "info".into(),
            format: LogFormat::Text,
        }
    }
}

/// OpenTelemetry layer driven by the provider's tracer.
///
/// Compose it into any subscriber; [`install`] uses it for the global one.
pub fn layer<S>(provider: &TelemetryProvider) -> OpenTelemetryLayer<S, Tracer>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    tracing_opentelemetry::layer().with_tracer(provider.tracer())
}

/// Register `provider` as the active telemetry provider of the process.
///
/// Sets the global tracer provider and W3C propagator, then installs the
/// global `tracing` subscriber. Only the first call has any effect; it
/// returns `Ok(true)`, later calls return `Ok(false)`.
///
/// # Errors
///
/// Fails if the filter directives are invalid or a global subscriber was
/// already installed by something else.
pub fn install(provider: &TelemetryProvider, settings: &BridgeSettings) -> Result<bool, TelemetryError> {
    let filter = EnvFilter::try_new(&settings.filter)?;

    let mut installed = INSTALLED.lock().unwrap_or_else(PoisonError::into_inner);
    if *installed {
        tracing::debug!("Telemetry bridge already installed, skipping");
        return Ok(false);
    }

    let fmt_layer = match settings.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_ansi(std::io::stdout().is_terminal())
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(layer(provider))
        .try_init()?;

    global::set_text_map_propagator(TraceContextPropagator::new());
    global::set_tracer_provider(provider.tracer_provider().clone());

    *installed = true;

    tracing::info!(
        service = provider.service_name(),
        format = ?settings.format,
        "Telemetry bridge installed"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_is_idempotent() {
        let provider = TelemetryProvider::in_process("bridge-test");
        let settings = BridgeSettings {
            filter: "error".into(),
            format: LogFormat::Text,
        };

        assert!(install(&provider, &settings).expect("first install"));
        assert!(!install(&provider, &settings).expect("second install"));
        assert!(!install(&provider, &settings).expect("third install"));
    }

    #[test]
    fn test_install_rejects_invalid_filter() {
        let provider = TelemetryProvider::in_process("bridge-test");
        let settings = BridgeSettings {
            filter: "beacon=notalevel".into(),
            format: LogFormat::Json,
        };

        let result = install(&provider, &settings);
        assert!(matches!(result, Err(TelemetryError::Filter(_))));
    }

    #[test]
    fn test_settings_follow_config() {
        let config = Config {
            log_level: "warn,beacon=debug".into(),
            log_format: LogFormat::Json,
            ..Config::default()
        };
        let settings = BridgeSettings::from_config(&config);
        assert_eq!(settings.filter, "warn,beacon=debug");
        assert_eq!(settings.format, LogFormat::Json);
    }
}
