//! KEGG client configuration

use super::{KeggError, KeggResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_BASE_URL: &str = "KEGGRAPH_BASE_URL";
pub const ENV_CACHE_DIR: &str = "KEGGRAPH_CACHE_DIR";
pub const ENV_TIMEOUT_SECS: &str = "KEGGRAPH_TIMEOUT_SECS";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeggConfig {
    /// REST endpoint, without trailing slash
    pub base_url: String,
    /// Directory holding cached responses
    pub cache_dir: PathBuf,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for KeggConfig {
    fn default() -> Self {
        Self {
            base_url: "https://rest.kegg.jp".to_string(),
            cache_dir: PathBuf::from("kegg_downloads"),
            timeout_secs: 60,
            user_agent: format!("keggraph/{}", crate::VERSION),
        }
    }
}

impl KeggConfig {
    /// Defaults overridden by the `KEGGRAPH_*` environment variables that are set
    pub fn from_env() -> KeggResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load a JSON config file; missing fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> KeggResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn from_lookup<F>(lookup: F) -> KeggResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL) {
            config = config.with_base_url(url);
        }
        if let Some(dir) = lookup(ENV_CACHE_DIR) {
            config = config.with_cache_dir(dir);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse().map_err(|_| {
                KeggError::Config(format!(
                    "{} must be a number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
            config = config.with_timeout_secs(secs);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
