//! Target resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound URI (path + query)
//!     → target.rs (strip mount prefix, substitute upstream host)
//!     → Target (https://{host}{path}{?query})
//!     → Pass to signing
//! ```
//!
//! # Design Decisions
//! - One upstream per process: there is no route table
//! - Resolution is a pure function of (mount point, host, uri)

pub mod target;

pub use target::{MountPoint, Target, UPSTREAM_SCHEME};
