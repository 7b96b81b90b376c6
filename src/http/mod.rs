//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → middleware/shared_secret.rs (403 unless x-secret-key matches)
//!     → request.rs (assign request ID)
//!     → server.rs (sanitize → resolve → sign → forward)
//!     → response.rs (stream 2xx, buffer everything else)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
