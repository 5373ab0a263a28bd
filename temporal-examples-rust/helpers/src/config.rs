//! Environment-sourced settings shared by every binary in the workspace.
//!
//! Values are resolved through a lookup function rather than `std::env`
//! directly, so that tests can feed a plain map instead of mutating the
//! process environment.

use std::{fmt::Display, str::FromStr};

use thiserror::Error;

pub const DEFAULT_TEMPORAL_HOST: &str = "localhost";
pub const DEFAULT_TEMPORAL_PORT: u16 = 7233;
pub const DEFAULT_TEMPORAL_NAMESPACE: &str = "default";

/// Missing or malformed configuration, detected before anything connects.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable `{0}`")]
    Missing(&'static str),

    #[error("invalid value {value:?} for `{key}`: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Lookup backed by the real process environment.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Returns the first non-blank value found under `keys`, trimmed.
pub fn first_set<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Like [`first_set`] but fails with [`ConfigError::Missing`] naming the
/// primary key.
pub fn required<F>(lookup: &F, keys: &[&'static str]) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    first_set(lookup, keys).ok_or(ConfigError::Missing(keys[0]))
}

/// Parses `key` if present, otherwise returns `default`.
pub fn parsed_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match first_set(lookup, &[key]) {
        Some(raw) => raw.parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            value: raw,
            reason: err.to_string(),
        }),
        None => Ok(default),
    }
}

/// Where the Temporal frontend lives and which namespace to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalConfig {
    pub host: String,
    pub port: u16,
    pub namespace: String,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_TEMPORAL_HOST.to_string(),
            port: DEFAULT_TEMPORAL_PORT,
            namespace: DEFAULT_TEMPORAL_NAMESPACE.to_string(),
        }
    }
}

impl TemporalConfig {
    /// Reads `TEMPORAL_HOST`, `TEMPORAL_PORT` and `TEMPORAL_NAMESPACE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = first_set(&lookup, &["TEMPORAL_HOST"])
            .unwrap_or_else(|| DEFAULT_TEMPORAL_HOST.to_string());
        let port = parsed_or(&lookup, "TEMPORAL_PORT", DEFAULT_TEMPORAL_PORT)?;
        let namespace = first_set(&lookup, &["TEMPORAL_NAMESPACE"])
            .unwrap_or_else(|| DEFAULT_TEMPORAL_NAMESPACE.to_string());

        Ok(Self {
            host,
            port,
            namespace,
        })
    }

    /// `http://{host}:{port}`; a host that already carries a scheme is kept
    /// as is.
    pub fn target_url(&self) -> String {
        if self.host.contains("://") {
            format!("{}:{}", self.host.trim_end_matches('/'), self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}
