//! Authenticating S3 signing proxy.
//!
//! Accepts requests carrying a shared secret, strips proxy and client
//! headers, rewrites the path onto the upstream host, signs the request with
//! SigV4 and relays the upstream response.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod signing;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use error::{ProxyError, StartupError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
