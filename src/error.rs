//! Error taxonomy for the request pipeline and for startup.
//!
//! Access denial is deliberately absent: the shared-secret middleware answers
//! it locally with a fixed 403 and it never propagates.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::config::ConfigError;
use crate::observability::metrics::{self, Outcome};
use crate::signing::SigningError;
use crate::upstream::TransportError;

/// Failures after authentication, each surfaced to the caller as a 5xx.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error("invalid upstream target `{0}`")]
    InvalidTarget(String),

    #[error("failed to build outbound request: {0}")]
    Request(#[from] axum::http::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),

    #[error("failed to read upstream error body: {0}")]
    UpstreamBody(#[source] axum::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Signing(_) | ProxyError::InvalidTarget(_) | ProxyError::Request(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ProxyError::Transport(_) | ProxyError::UpstreamBody(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        metrics::record_outcome(Outcome::Fault, status.as_u16());

        let message = match status {
            StatusCode::BAD_GATEWAY => "Upstream request failed",
            StatusCode::GATEWAY_TIMEOUT => "Upstream request timed out",
            _ => "Internal Server Error",
        };
        (status, message).into_response()
    }
}

/// Failures that stop the proxy from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot build request signer: {0}")]
    Signer(#[from] SigningError),

    #[error("shared secret is not configured")]
    MissingSecret,

    #[error("invalid upstream host `{0}`")]
    InvalidHost(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
