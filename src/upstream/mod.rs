//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! Signed request
//!     → forwarder.rs (header timeout, latency metric)
//!     → client.rs (UpstreamTransport: pooled HTTPS client)
//!     → object-storage endpoint
//!     → Response<Body> (body still streaming)
//! ```
//!
//! # Design Decisions
//! - One attempt per request: no retries, no load balancing
//! - The timeout covers the wait for response headers only

pub mod client;
pub mod forwarder;

pub use client::{HttpsTransport, TransportError, UpstreamTransport};
pub use forwarder::Forwarder;
