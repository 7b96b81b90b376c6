//! Configuration validation.
//!
//! # Responsibilities
//! - Reject missing required values (secret, upstream host, region, credentials)
//! - Validate value shapes (host is an authority, mount prefix is a path)
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::uri::Authority;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required value `{0}`")]
    Missing(&'static str),

    #[error("upstream host `{0}` is not a valid authority")]
    InvalidHost(String),

    #[error("mount prefix `{0}` must start with '/' and must not end with '/'")]
    InvalidMountPrefix(String),

    #[error("bind address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("timeout `{0}` must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("denied header `{0}` is not a valid header name")]
    InvalidHeaderName(String),
}

/// Check a loaded configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let required = [
        ("auth.shared_secret", &config.auth.shared_secret),
        ("upstream.host", &config.upstream.host),
        ("upstream.region", &config.upstream.region),
        ("upstream.service", &config.upstream.service),
        ("upstream.access_key_id", &config.upstream.access_key_id),
        ("upstream.secret_access_key", &config.upstream.secret_access_key),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError::Missing(name));
        }
    }

    let host = &config.upstream.host;
    if !host.is_empty() && host.parse::<Authority>().is_err() {
        errors.push(ValidationError::InvalidHost(host.clone()));
    }

    let prefix = &config.listener.mount_prefix;
    if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
        errors.push(ValidationError::InvalidMountPrefix(prefix.clone()));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.connect_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.upstream_secs"));
    }

    for name in &config.sanitizer.extra_denied_headers {
        if axum::http::HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidHeaderName(name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ProxyConfig {
        let mut config = ProxyConfig::default();
        config.auth.shared_secret = "s3cret".into();
        config.upstream.host = "storage.example.com".into();
        config.upstream.region = "eu-central-1".into();
        config.upstream.access_key_id = "AKIDEXAMPLE".into();
        config.upstream.secret_access_key = "wJalrXUtnFEMI/K7MDENG".into();
        config
    }

    #[test]
    fn test_complete_config_is_valid() {
        assert!(validate_config(&complete()).is_ok());
    }

    #[test]
    fn test_default_config_reports_every_missing_value() {
        let errors = validate_config(&ProxyConfig::default()).unwrap_err();
        for name in [
            "auth.shared_secret",
            "upstream.host",
            "upstream.region",
            "upstream.access_key_id",
            "upstream.secret_access_key",
        ] {
            assert!(
                errors.contains(&ValidationError::Missing(name)),
                "expected {name} to be reported, got {errors:?}"
            );
        }
    }

    #[test]
    fn test_whitespace_credentials_are_missing() {
        let mut config = complete();
        config.upstream.secret_access_key = "   ".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::Missing("upstream.secret_access_key")]);
    }

    #[test]
    fn test_shape_checks() {
        let mut config = complete();
        config.upstream.host = "https://storage.example.com/".into();
        config.listener.mount_prefix = "s3-proxy/".into();
        config.timeouts.upstream_secs = 0;
        config.sanitizer.extra_denied_headers = vec!["bad header".into()];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(matches!(errors[0], ValidationError::InvalidHost(_)));
        assert!(matches!(errors[1], ValidationError::InvalidMountPrefix(_)));
        assert!(matches!(errors[2], ValidationError::ZeroTimeout("timeouts.upstream_secs")));
        assert!(matches!(errors[3], ValidationError::InvalidHeaderName(_)));
    }

    #[test]
    fn test_empty_mount_prefix_is_allowed() {
        let mut config = complete();
        config.listener.mount_prefix = String::new();
        assert!(validate_config(&config).is_ok());
    }
}
