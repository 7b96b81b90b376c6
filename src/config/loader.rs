//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Shared secret callers must present.
pub const ENV_SHARED_SECRET: &str = "HARDCODED_SECRET";
/// Upstream object-storage host.
pub const ENV_UPSTREAM_HOST: &str = "FR_S3_ENDPOINT";
/// Upstream region.
pub const ENV_REGION: &str = "FR_S3_REGION";
/// Access key identifier.
pub const ENV_ACCESS_KEY_ID: &str = "FR_S3_KEY";
/// Access key secret.
pub const ENV_SECRET_ACCESS_KEY: &str = "FR_S3_SECRET";
/// Optional session token.
pub const ENV_SESSION_TOKEN: &str = "FR_S3_SESSION_TOKEN";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, overlay the process
/// environment, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ProxyConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values onto `config`. Set variables win over file values.
pub fn apply_env<F>(config: &mut ProxyConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let targets = [
        (ENV_SHARED_SECRET, &mut config.auth.shared_secret),
        (ENV_UPSTREAM_HOST, &mut config.upstream.host),
        (ENV_REGION, &mut config.upstream.region),
        (ENV_ACCESS_KEY_ID, &mut config.upstream.access_key_id),
        (ENV_SECRET_ACCESS_KEY, &mut config.upstream.secret_access_key),
    ];
    for (key, slot) in targets {
        if let Some(value) = lookup(key) {
            *slot = value;
        }
    }

    if let Some(token) = lookup(ENV_SESSION_TOKEN).filter(|t| !t.is_empty()) {
        config.upstream.session_token = Some(token);
    }
}
