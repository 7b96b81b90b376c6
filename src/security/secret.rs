//! Shared-secret authentication.
//!
//! The caller presents the secret in [`SECRET_HEADER`]; anything other than an
//! exact byte-for-byte match with the configured secret is denied.

use axum::http::{HeaderMap, HeaderName};
use subtle::ConstantTimeEq;

/// Header carrying the caller's shared secret.
pub const SECRET_HEADER: HeaderName = HeaderName::from_static("x-secret-key");

/// Outcome of a secret check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Authorized,
    Denied,
}

/// The configured expected secret.
#[derive(Clone)]
pub struct SharedSecret {
    expected: Vec<u8>,
}

impl SharedSecret {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into().into_bytes(),
        }
    }

    /// Check the secret header without inspecting any other header.
    pub fn verify(&self, headers: &HeaderMap) -> Verdict {
        let Some(provided) = headers.get(&SECRET_HEADER) else {
            return Verdict::Denied;
        };

        // An empty expected secret never authorizes anything.
        if self.expected.is_empty() {
            return Verdict::Denied;
        }

        if provided.as_bytes().ct_eq(&self.expected).into() {
            Verdict::Authorized
        } else {
            Verdict::Denied
        }
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret(** redacted **)")
    }
}
