//! Shared-secret gate.
//! Runs outermost, before any other layer reads a header.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::observability::metrics::{self, Outcome};
use crate::security::{SharedSecret, Verdict};

pub async fn require_shared_secret(
    State(secret): State<SharedSecret>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match secret.verify(request.headers()) {
        Verdict::Authorized => next.run(request).await,
        Verdict::Denied => {
            warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected request with missing or invalid secret"
            );
            metrics::record_outcome(Outcome::Forbidden, StatusCode::FORBIDDEN.as_u16());
            (StatusCode::FORBIDDEN, "Forbidden").into_response()
        }
    }
}
