//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{self, Body, Bytes};
use axum::http::{HeaderMap, Method, Request, Response, StatusCode, Uri};
use s3_signing_proxy::config::ProxyConfig;
use s3_signing_proxy::upstream::{TransportError, UpstreamTransport};
use s3_signing_proxy::HttpServer;

pub const SECRET: &str = "open-sesame";
pub const UPSTREAM_HOST: &str = "storage.example.com";

/// Complete configuration pointing at [`UPSTREAM_HOST`].
pub fn test_config() -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.auth.shared_secret = SECRET.into();
    config.upstream.host = UPSTREAM_HOST.into();
    config.upstream.region = "eu-central-1".into();
    config.upstream.access_key_id = "AKIDEXAMPLE".into();
    config.upstream.secret_access_key = "wJalrXUtnFEMI/K7MDENG".into();
    config
}

/// A request exactly as the upstream received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

type Responder = dyn Fn(&RecordedRequest) -> Response<Body> + Send + Sync;

/// Upstream stand-in that records every request and answers from a closure.
pub struct MockTransport {
    calls: Mutex<Vec<RecordedRequest>>,
    respond: Box<Responder>,
}

impl MockTransport {
    pub fn new<F>(respond: F) -> Arc<Self>
    where
        F: Fn(&RecordedRequest) -> Response<Body> + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        })
    }

    /// Always answers with `status` and `body`.
    pub fn fixed(status: StatusCode, body: &'static str) -> Arc<Self> {
        Self::new(move |_| {
            Response::builder()
                .status(status)
                .header("content-type", "text/plain")
                .body(Body::from(body))
                .unwrap()
        })
    }

    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamTransport for MockTransport {
    async fn send(&self, request: Request<Body>) -> Result<Response<Body>, TransportError> {
        let (parts, body) = request.into_parts();
        let body = body::to_bytes(body, usize::MAX)
            .await
            .map_err(TransportError::new)?;
        let recorded = RecordedRequest {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
        };
        let response = (self.respond)(&recorded);
        self.calls.lock().unwrap().push(recorded);
        Ok(response)
    }
}

/// Build a router over `transport` with the default test configuration.
pub fn router_with(transport: Arc<dyn UpstreamTransport>) -> axum::Router {
    router_with_config(test_config(), transport)
}

pub fn router_with_config(config: ProxyConfig, transport: Arc<dyn UpstreamTransport>) -> axum::Router {
    HttpServer::with_transport(config, transport)
        .expect("test config is complete")
        .router()
}

/// Read a whole response body.
pub async fn body_bytes(response: Response<Body>) -> Bytes {
    body::to_bytes(response.into_body(), usize::MAX).await.unwrap()
}
