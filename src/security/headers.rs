//! Inbound header sanitization.
//!
//! # Responsibilities
//! - Strip credentials the signer must set itself (authorization, host)
//! - Strip the shared secret so it never reaches the upstream
//! - Strip client-IP, CDN diagnostic, and X-Forwarded-* headers
//! - Strip hop-specific framing (transfer-encoding)
//!
//! # Design Decisions
//! - The denylist is data: filtering is a set-membership test
//! - `HeaderName` is always lowercase, so membership is case-insensitive
//! - Every surviving value is copied unchanged, in its original order

use std::collections::HashSet;

use axum::http::{HeaderMap, HeaderName};

/// Headers never forwarded upstream.
pub const DENIED_HEADERS: &[&str] = &[
    "authorization",
    "host",
    "x-secret-key",
    "x-real-ip",
    "cf-connecting-ip",
    "cf-ew-preview-server",
    "cf-ipcountry",
    "cf-ray",
    "cf-visitor",
    "x-forwarded-for",
    "x-forwarded-host",
    "x-forwarded-path",
    "x-forwarded-port",
    "x-forwarded-prefix",
    "x-forwarded-proto",
    "transfer-encoding",
];

/// Immutable header denylist applied to every inbound request.
#[derive(Debug, Clone)]
pub struct HeaderSanitizer {
    denied: HashSet<HeaderName>,
}

impl Default for HeaderSanitizer {
    fn default() -> Self {
        Self {
            denied: DENIED_HEADERS
                .iter()
                .copied()
                .map(HeaderName::from_static)
                .collect(),
        }
    }
}

impl HeaderSanitizer {
    /// Built-in denylist extended with `extra` names.
    ///
    /// Names that are not valid header names are skipped; validation has
    /// already reported them by the time the server is built.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sanitizer = Self::default();
        sanitizer.denied.extend(
            extra
                .into_iter()
                .filter_map(|name| HeaderName::from_bytes(name.as_ref().as_bytes()).ok()),
        );
        sanitizer
    }

    /// Returns true if `name` is stripped.
    pub fn is_denied(&self, name: &HeaderName) -> bool {
        self.denied.contains(name)
    }

    /// Copy every header not on the denylist into a fresh map.
    pub fn sanitize(&self, headers: &HeaderMap) -> HeaderMap {
        let mut clean = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            if !self.is_denied(name) {
                clean.append(name.clone(), value.clone());
            }
        }
        clean
    }
}
