//! Settings for the document service and for the client trigger.

use helpers::config::{env_lookup, first_set, parsed_or, required};
use reqwest::Url;

pub use helpers::ConfigError;

/// Task queue the worker polls and the client starts executions on.
pub const TASK_QUEUE: &str = "doc-router-task-queue";

pub const DEFAULT_SKIP: u32 = 0;
pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 100;

/// Base URL and bearer token of the DocRouter API.
///
/// Built once when the worker starts and handed to the activity; nothing
/// re-reads the environment per call.
#[derive(Clone, PartialEq, Eq)]
pub struct DocRouterConfig {
    pub base_url: Url,
    pub api_token: String,
}

// Keep the token out of logs.
impl std::fmt::Debug for DocRouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocRouterConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"<redacted>")
            .finish()
    }
}

impl DocRouterConfig {
    pub fn new(base_url: &str, api_token: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            api_token: api_token.into(),
        })
    }

    /// Reads `DOCROUTER_BASE_URL` and `DOCROUTER_API_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = required(&lookup, &["DOCROUTER_BASE_URL"])?;
        let api_token = required(&lookup, &["DOCROUTER_API_TOKEN", "DOCROUTER_ORG_API_TOKEN"])?;
        Self::new(&base_url, api_token)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: "DOCROUTER_BASE_URL",
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme `{other}`"))),
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    Ok(url)
}

/// What the client trigger asks the workflow for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub organization_id: String,
    pub skip: u32,
    pub limit: u32,
    /// Fixed workflow id; a fresh one is generated per run when unset.
    pub workflow_id: Option<String>,
}

impl ClientConfig {
    /// Reads `ORGANIZATION_ID` (or `DOCROUTER_ORG_ID`), `DOCROUTER_SKIP`,
    /// `DOCROUTER_LIMIT` and `WORKFLOW_ID`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let organization_id = required(&lookup, &["ORGANIZATION_ID", "DOCROUTER_ORG_ID"])?;
        let skip = parsed_or(&lookup, "DOCROUTER_SKIP", DEFAULT_SKIP)?;
        let limit = parsed_or(&lookup, "DOCROUTER_LIMIT", DEFAULT_LIMIT)?;

        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ConfigError::Invalid {
                key: "DOCROUTER_LIMIT",
                value: first_set(&lookup, &["DOCROUTER_LIMIT"]).unwrap_or_default(),
                reason: format!("must be between 1 and {MAX_LIMIT}"),
            });
        }

        Ok(Self {
            organization_id,
            skip,
            limit,
            workflow_id: first_set(&lookup, &["WORKFLOW_ID"]),
        })
    }
}
