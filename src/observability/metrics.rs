//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by outcome and status
//! - `proxy_upstream_duration_seconds` (histogram): time to upstream headers
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - The Prometheus endpoint is opt-in

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// How a request left the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Rejected by the shared-secret check.
    Forbidden,
    /// Upstream 2xx, streamed back.
    Relayed,
    /// Upstream non-2xx, buffered and relayed.
    UpstreamError,
    /// Local or transport failure.
    Fault,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Forbidden => "forbidden",
            Outcome::Relayed => "relayed",
            Outcome::UpstreamError => "upstream_error",
            Outcome::Fault => "fault",
        }
    }
}

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_outcome(outcome: Outcome, status: u16) {
    metrics::counter!(
        "proxy_requests_total",
        "outcome" => outcome.as_str(),
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_upstream_latency(start: Instant) {
    metrics::histogram!("proxy_upstream_duration_seconds").record(start.elapsed().as_secs_f64());
}
