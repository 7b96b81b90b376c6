//! Request signing subsystem.
//!
//! # Data Flow
//! ```text
//! (method, Target, sanitized headers)
//!     → sigv4.rs (canonical request, date-scoped HMAC signature)
//!     → signed HeaderMap (+ authorization, x-amz-date, x-amz-content-sha256,
//!       host forced to the target host)
//!     → Pass to forwarder
//! ```
//!
//! # Design Decisions
//! - Signing never touches the body, so uploads stay streamed
//! - The signing time is an explicit input; callers pass `SystemTime::now()`
//! - Blank credentials are rejected when the signer is built

pub mod sigv4;

pub use sigv4::{RequestSigner, SigningError, CONTENT_SHA256};
