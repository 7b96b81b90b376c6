//! Response relay.
//!
//! # Responsibilities
//! - Pass successful upstream responses through with the body streaming
//! - Buffer failed upstream responses so their body can be logged
//!
//! # Design Decisions
//! - 2xx bodies are never held in memory; non-2xx bodies are read whole
//!   and logged before being re-emitted
//! - Status and headers are never rewritten
//! - There is no cap on the buffered failure body

use axum::body::{self, Body};
use axum::http::Response;
use tracing::{debug, warn};

use crate::error::ProxyError;
use crate::observability::metrics::{self, Outcome};

/// Relay an upstream response to the caller.
pub async fn relay(response: Response<Body>, request_id: &str) -> Result<Response<Body>, ProxyError> {
    let status = response.status();

    if status.is_success() {
        debug!(request_id = %request_id, status = status.as_u16(), "Streaming upstream response");
        metrics::record_outcome(Outcome::Relayed, status.as_u16());
        return Ok(response);
    }

    let (parts, body) = response.into_parts();
    let bytes = body::to_bytes(body, usize::MAX)
        .await
        .map_err(ProxyError::UpstreamBody)?;

    warn!(
        request_id = %request_id,
        status = status.as_u16(),
        headers = ?parts.headers,
        body = %String::from_utf8_lossy(&bytes),
        "Upstream returned an error"
    );
    metrics::record_outcome(Outcome::UpstreamError, status.as_u16());

    Ok(Response::from_parts(parts, Body::from(bytes)))
}
