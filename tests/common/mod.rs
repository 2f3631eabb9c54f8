//! Test utilities and server harness for Beacon tests.
//!
//! Provides:
//! - In-process test server on an ephemeral port
//! - In-memory log capture for subscriber assertions

#![allow(dead_code)]

use beacon::config::Config;
use beacon::http::{router, AppState};
use beacon::observability::TelemetryProvider;
use beacon::server::{serve, ServerError};
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing_subscriber::fmt::MakeWriter;

/// W3C `traceparent` used by propagation tests.
pub const TRACEPARENT: &str = "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01";
pub const TRACE_ID: &str = "4bf92f3577b34da6a3ce929d0e0e4736";

/// Beacon server running in-process on a random loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    /// Start a server with the default test configuration.
    pub async fn start() -> Self {
        Self::start_with(Config::test_config()).await
    }

    /// Start a server with the given configuration (host/port are ignored).
    pub async fn start_with(config: Config) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let addr = listener.local_addr().expect("listener has no address");

        let provider = TelemetryProvider::in_process("beacon-test");
        let app = router(AppState::from_config(&config), &provider);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(serve(listener, app, shutdown_rx));

        Self {
            addr,
            shutdown_tx,
            handle,
        }
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Signal shutdown and wait for the server task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        self.handle
            .await
            .expect("server task panicked")
            .expect("server returned an error");
    }
}

/// Log output captured in memory.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let buffer = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Lines containing `needle`.
    pub fn lines_containing(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

pub struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter(Arc::clone(&self.0))
    }
}

/// Pull the value of `key=` out of a text-formatted log line.
pub fn field_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let start = line.find(&format!("{key}="))? + key.len() + 1;
    let rest = &line[start..];
    let end = rest
        .find(|c: char| c == ' ' || c == '}')
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_reads_span_fields() {
        let line = "INFO request{method=GET uri=/ trace_id=abc span_id=def}: beacon: Home requested";
        assert_eq!(field_value(line, "trace_id"), Some("abc"));
        assert_eq!(field_value(line, "span_id"), Some("def"));
        assert_eq!(field_value(line, "missing"), None);

        let line = "INFO beacon::server: Starting Beacon HTTP server address=127.0.0.1:8080 process_delay_ms=0";
        assert_eq!(field_value(line, "address"), Some("127.0.0.1:8080"));
    }
}
