//! Dispatch of signed requests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Request, Response};

use crate::error::ProxyError;
use crate::observability::metrics;
use crate::upstream::client::UpstreamTransport;

/// Sends signed requests upstream, bounded by a header timeout.
#[derive(Clone)]
pub struct Forwarder {
    transport: Arc<dyn UpstreamTransport>,
    timeout: Duration,
}

impl Forwarder {
    pub fn new(transport: Arc<dyn UpstreamTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send `request` and wait for the response headers.
    ///
    /// No retries: a transport failure or an elapsed timeout is returned to
    /// the caller as-is.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response<Body>, ProxyError> {
        let start = Instant::now();
        let result = tokio::time::timeout(self.timeout, self.transport.send(request)).await;
        metrics::record_upstream_latency(start);

        match result {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(ProxyError::Transport(e)),
            Err(_) => Err(ProxyError::Timeout(self.timeout)),
        }
    }
}
