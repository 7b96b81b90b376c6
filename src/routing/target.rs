//! Upstream target resolution.
//!
//! # Responsibilities
//! - Strip the mount prefix from the inbound path
//! - Substitute the configured upstream host
//! - Carry the query string over verbatim
//!
//! # Design Decisions
//! - The prefix only matches on a segment boundary: `/s3-proxyfoo` is not
//!   under `/s3-proxy` and is forwarded as-is
//! - Paths and queries are never decoded or re-encoded
//! - An empty remaining path addresses the upstream root

use axum::http::uri::{Authority, InvalidUri, Uri};

/// Scheme used for every upstream request.
pub const UPSTREAM_SCHEME: &str = "https";

/// The path segment at which the proxy is exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    prefix: String,
}

impl MountPoint {
    /// Create a mount point. An empty prefix mounts the proxy at the root.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Remove the prefix from `path`, or return `path` unchanged if the
    /// prefix is absent.
    pub fn strip<'a>(&self, path: &'a str) -> &'a str {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        }
    }
}

/// Fully resolved upstream location for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    host: String,
    path: String,
    query: Option<String>,
}

impl Target {
    /// Resolve an inbound path and query against the upstream host.
    pub fn resolve(mount: &MountPoint, host: &str, path: &str, query: Option<&str>) -> Self {
        Self {
            host: host.to_string(),
            path: mount.strip(path).to_string(),
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
        }
    }

    /// Resolve directly from an inbound request URI.
    pub fn from_uri(mount: &MountPoint, host: &str, uri: &Uri) -> Self {
        Self::resolve(mount, host, uri.path(), uri.query())
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Path with the mount prefix removed. Empty for a root request.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Parse the host as a URI authority.
    pub fn authority(&self) -> Result<Authority, InvalidUri> {
        self.host.parse()
    }

    /// Parse the full URL into a request URI.
    pub fn uri(&self) -> Result<Uri, InvalidUri> {
        self.to_string().parse()
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}{}", UPSTREAM_SCHEME, self.host, self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        Ok(())
    }
}
