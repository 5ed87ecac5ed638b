//! Configuration module
//!
//! The remote API root is injected instead of hard-coded. Values come from
//! explicit construction or from the environment (with `.env` support).

use std::env;
use std::time::Duration;

use crate::error::{WorkflowError, WorkflowResult};

const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Settings for the remote transcoding API client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Remote API root, without trailing slash
    pub base_url: String,
    /// Per-request timeout. `None` means requests may wait indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> WorkflowResult<Self> {
        let base_url = normalize_base_url(&base_url.into())?;
        Ok(Self {
            base_url,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from VIDUP_API_URL (or API_URL) and VIDUP_HTTP_TIMEOUT_SECS.
    pub fn from_env() -> WorkflowResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> WorkflowResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("VIDUP_API_URL")
            .or_else(|| lookup("API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match lookup("VIDUP_HTTP_TIMEOUT_SECS") {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => None,
        };

        let config = Self::new(base_url)?.with_timeout(timeout);
        tracing::debug!(
            base_url = %config.base_url,
            timeout_secs = config.timeout.map(|t| t.as_secs()),
            "Loaded client configuration"
        );
        Ok(config)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Parse a timeout in whole seconds. Zero disables the timeout.
pub fn parse_timeout_secs(raw: &str) -> WorkflowResult<Option<Duration>> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        WorkflowError::Config(format!(
            "VIDUP_HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
            raw
        ))
    })?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

fn normalize_base_url(raw: &str) -> WorkflowResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| WorkflowError::Config(format!("Invalid API URL '{}': {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(WorkflowError::Config(format!(
            "API URL must use http or https, got '{}'",
            other
        ))),
    }
}
