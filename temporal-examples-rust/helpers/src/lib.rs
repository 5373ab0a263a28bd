//! Shared utilities used by the worker and client binaries.

use std::str::FromStr;

use anyhow::Context;
use env_logger::Env;
use log::info;
use temporal_client::{Client, RetryClient};
use temporal_sdk::sdk_client_options;
use temporal_sdk_core::Url;

pub mod config;
mod parse_activity_result;

pub use config::{ConfigError, TemporalConfig};
pub use parse_activity_result::{failure_message, parse_activity_result};

/// Install `env_logger` with an `info` fallback filter (override via
/// `RUST_LOG`).
pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

/// Connect to the Temporal frontend described by `cfg`.
///
/// The returned `RetryClient<Client>` retries transient RPC failures on its
/// own; failing to establish the initial connection is reported as an error.
pub async fn connect(cfg: &TemporalConfig) -> Result<RetryClient<Client>, anyhow::Error> {
    let target = cfg.target_url();
    let url = Url::from_str(&target)
        .with_context(|| format!("invalid Temporal server address {target}"))?;

    let opts = sdk_client_options(url)
        .build()
        .context("failed building Temporal client options")?;

    info!("Connecting to Temporal at {target} (namespace={})", cfg.namespace);

    let client = opts
        .connect(cfg.namespace.clone(), None)
        .await
        .with_context(|| format!("failed connecting to Temporal server at {target}"))?;

    Ok(client)
}
