//! HTTP server setup and the proxy pipeline.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy handler
//! - Wire up middleware (secret gate, request ID, tracing)
//! - Bind server to listener with graceful shutdown
//! - Run the per-request pipeline:
//!   sanitize → resolve target → sign → forward → relay

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use tracing::{debug, info_span};

use crate::config::ProxyConfig;
use crate::error::{ProxyError, StartupError};
use crate::http::middleware::require_shared_secret;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::response;
use crate::routing::{MountPoint, Target};
use crate::security::{HeaderSanitizer, SharedSecret};
use crate::signing::RequestSigner;
use crate::upstream::{Forwarder, HttpsTransport, UpstreamTransport};

/// Application state injected into handlers. Read-only and shared by all
/// requests.
#[derive(Clone)]
pub struct AppState {
    pub mount: Arc<MountPoint>,
    pub upstream_host: Arc<str>,
    pub sanitizer: Arc<HeaderSanitizer>,
    pub signer: Arc<RequestSigner>,
    pub forwarder: Forwarder,
}

/// HTTP server for the signing proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server that forwards over HTTPS.
    pub fn new(config: ProxyConfig) -> Result<Self, StartupError> {
        let transport = Arc::new(HttpsTransport::new(&config.timeouts));
        Self::with_transport(config, transport)
    }

    /// Create a server that forwards through `transport`.
    pub fn with_transport(
        config: ProxyConfig,
        transport: Arc<dyn UpstreamTransport>,
    ) -> Result<Self, StartupError> {
        if config.auth.shared_secret.trim().is_empty() {
            return Err(StartupError::MissingSecret);
        }

        let host = config.upstream.host.clone();
        if host.parse::<axum::http::uri::Authority>().is_err() {
            return Err(StartupError::InvalidHost(host));
        }

        let signer = RequestSigner::from_config(&config.upstream)?;

        let state = AppState {
            mount: Arc::new(MountPoint::new(config.listener.mount_prefix.clone())),
            upstream_host: Arc::from(host),
            sanitizer: Arc::new(HeaderSanitizer::with_extra(
                &config.sanitizer.extra_denied_headers,
            )),
            signer: Arc::new(signer),
            forwarder: Forwarder::new(
                transport,
                Duration::from_secs(config.timeouts.upstream_secs),
            ),
        };

        let secret = SharedSecret::new(config.auth.shared_secret.clone());
        let router = Self::build_router(state, secret);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers added last run first, so the secret gate sees the request
    /// before anything else does.
    fn build_router(state: AppState, secret: SharedSecret) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request.request_id(),
                )
            }))
            .layer(set_request_id_layer())
            .layer(middleware::from_fn_with_state(secret, require_shared_secret))
    }

    /// The configured router, for driving the pipeline without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mount_prefix = %self.config.listener.mount_prefix,
            upstream = %self.config.upstream.host,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    match proxy(&state, request).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn proxy(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let request_id = parts.headers.request_id().to_string();

    debug!(
        request_id = %request_id,
        method = %parts.method,
        uri = %parts.uri,
        "Inbound request"
    );

    // 1. Sanitize
    let headers = state.sanitizer.sanitize(&parts.headers);

    // 2. Resolve target
    let target = Target::from_uri(&state.mount, &state.upstream_host, &parts.uri);
    let uri = target
        .uri()
        .map_err(|_| ProxyError::InvalidTarget(target.to_string()))?;

    // 3. Sign
    let signed = state
        .signer
        .sign(&parts.method, &target, &headers, SystemTime::now())?;

    // 4. Forward, body untouched
    let mut outbound = Request::builder()
        .method(parts.method)
        .uri(uri)
        .body(body)?;
    *outbound.headers_mut() = signed;

    debug!(request_id = %request_id, target = %target, "Forwarding signed request");

    let upstream = state.forwarder.forward(outbound).await?;

    // 5. Relay
    response::relay(upstream, &request_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProxyConfig {
        let mut config = ProxyConfig::default();
        config.auth.shared_secret = "s3cret".into();
        config.upstream.host = "storage.example.com".into();
        config.upstream.region = "auto".into();
        config.upstream.access_key_id = "AKID".into();
        config.upstream.secret_access_key = "SECRET".into();
        config
    }

    #[tokio::test]
    async fn test_server_builds_from_complete_config() {
        assert!(HttpServer::new(config()).is_ok());
    }

    #[tokio::test]
    async fn test_missing_secret_fails_fast() {
        let mut config = config();
        config.auth.shared_secret.clear();
        assert!(matches!(HttpServer::new(config), Err(StartupError::MissingSecret)));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_fast() {
        let mut config = config();
        config.upstream.access_key_id.clear();
        assert!(matches!(HttpServer::new(config), Err(StartupError::Signer(_))));
    }

    #[tokio::test]
    async fn test_invalid_host_fails_fast() {
        let mut config = config();
        config.upstream.host = "not a host".into();
        assert!(matches!(HttpServer::new(config), Err(StartupError::InvalidHost(_))));
    }
}
