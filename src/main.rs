//! Authenticating S3 signing proxy (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────────────┐
//!                    │                    SIGNING PROXY                         │
//!                    │                                                          │
//!  Client Request    │  ┌──────────┐   ┌───────────┐   ┌──────────┐            │
//!  ──────────────────┼─▶│ security │──▶│ security  │──▶│ routing  │            │
//!   x-secret-key     │  │  secret  │   │  headers  │   │  target  │            │
//!                    │  └────┬─────┘   └───────────┘   └────┬─────┘            │
//!                    │       │ 403                          ▼                  │
//!                    │       ▼                         ┌──────────┐            │
//!  ◀─────────────────┼── Forbidden                      │ signing  │            │
//!                    │                                 │  sigv4   │            │
//!                    │                                 └────┬─────┘            │
//!                    │                                      ▼                  │
//!  Client Response   │  ┌──────────┐                   ┌──────────┐            │
//!  ◀─────────────────┼──│ response │◀──────────────────│ upstream │◀───────────┼──── Object
//!                    │  │  relay   │                   │forwarder │            │     Storage
//!                    │  └──────────┘                   └──────────┘            │
//!                    └──────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use s3_signing_proxy::config::{load_config, LogFormat};
use s3_signing_proxy::lifecycle::startup;
use s3_signing_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "s3-signing-proxy")]
#[command(about = "Authenticating reverse proxy that signs requests for object storage", long_about = None)]
struct Cli {
    /// Optional TOML config file. Environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Emit JSON logs regardless of the config file.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if cli.json_logs {
        config.observability.log_format = LogFormat::Json;
    }

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        mount_prefix = %config.listener.mount_prefix,
        upstream = %config.upstream.host,
        region = %config.upstream.region,
        "s3-signing-proxy starting"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
