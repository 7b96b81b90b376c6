//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → secret.rs (check x-secret-key, deny with 403 on mismatch)
//!     → headers.rs (strip denylisted headers)
//!     → Pass to routing
//! ```
//!
//! # Design Decisions
//! - The secret check runs before any other header is looked at
//! - Fail closed: a missing or empty secret is a denial
//! - No trust in client input: proxy/CDN headers never reach the upstream

pub mod headers;
pub mod secret;

pub use headers::{HeaderSanitizer, DENIED_HEADERS};
pub use secret::{SharedSecret, Verdict, SECRET_HEADER};
