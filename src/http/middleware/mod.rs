//! Request middleware.

pub mod shared_secret;

pub use shared_secret::require_shared_secret;
