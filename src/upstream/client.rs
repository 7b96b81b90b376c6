//! Outbound HTTPS transport.
//!
//! # Responsibilities
//! - Own the connection pool to the object-storage endpoint
//! - Enforce the connect timeout
//! - Hand back the upstream response with its body still streaming
//!
//! # Design Decisions
//! - `UpstreamTransport` is the seam between the pipeline and the network;
//!   tests substitute a recording implementation
//! - TLS only: the connector refuses plain-http URIs

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use hyper::body::Incoming;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::TimeoutConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Network-level failure talking to the upstream (connect, DNS, TLS, reset).
#[derive(Debug, thiserror::Error)]
#[error("upstream transport failed: {source}")]
pub struct TransportError {
    #[source]
    source: BoxError,
}

impl TransportError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Sends one fully-formed request upstream.
#[async_trait]
pub trait UpstreamTransport: Send + Sync + 'static {
    async fn send(&self, request: Request<Body>) -> Result<Response<Body>, TransportError>;
}

/// Pooled hyper client over rustls.
#[derive(Clone)]
pub struct HttpsTransport {
    client: Client<HttpsConnector<HttpConnector>, Body>,
}

impl HttpsTransport {
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let https = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_only()
            .enable_http1()
            .wrap_connector(http);

        let client = Client::builder(TokioExecutor::new()).build(https);
        Self { client }
    }
}

#[async_trait]
impl UpstreamTransport for HttpsTransport {
    async fn send(&self, request: Request<Body>) -> Result<Response<Body>, TransportError> {
        let response: Response<Incoming> = self
            .client
            .request(request)
            .await
            .map_err(TransportError::new)?;
        Ok(response.map(Body::new))
    }
}
