//! Harness configuration via `solr-relevance.toml` and the environment
//!
//! Two connection profiles are supported:
//! - a single service URL (`SOLR_URL`), e.g. `http://localhost:8983/solr/catalog`
//! - a base URL plus a core name (`SOLR_BASE_URL` + `SOLR_CORE`)
//!
//! A TOML file named by `SOLR_RELEVANCE_CONFIG` is read first; environment
//! variables override its values.

use serde::{Deserialize, Serialize};
use solr_relevance_core::{Error, Result};
use std::path::Path;

/// Names the optional TOML config file
pub const ENV_CONFIG_FILE: &str = "SOLR_RELEVANCE_CONFIG";
/// Full service URL (single-URL profile)
pub const ENV_URL: &str = "SOLR_URL";
/// Service base URL (base + core profile)
pub const ENV_BASE_URL: &str = "SOLR_BASE_URL";
/// Core name (base + core profile)
pub const ENV_CORE: &str = "SOLR_CORE";
/// Default request handler
pub const ENV_HANDLER: &str = "SOLR_HANDLER";

/// Handler used when none is configured
pub const DEFAULT_HANDLER: &str = "select";

/// Where the service lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionProfile {
    /// Complete service URL
    Url(String),
    /// Base URL with a named core appended
    Core {
        /// e.g. `http://localhost:8983/solr`
        base_url: String,
        /// e.g. `catalog`
        core: String,
    },
}

impl ConnectionProfile {
    /// URL that handler paths are appended to, without a trailing slash
    pub fn service_url(&self) -> String {
        match self {
            ConnectionProfile::Url(url) => url.trim_end_matches('/').to_string(),
            ConnectionProfile::Core { base_url, core } => format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                core.trim_matches('/')
            ),
        }
    }
}

/// Harness configuration loaded from `solr-relevance.toml` and the environment.
///
/// # Example
///
/// ```toml
/// url = "http://localhost:8983/solr/catalog"
/// handler = "select"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarnessConfig {
    /// Full service URL; takes precedence over `base_url` + `core`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Base URL for the base + core profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Core name for the base + core profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core: Option<String>,
    /// Default request handler path
    #[serde(default = "default_handler")]
    pub handler: String,
}

fn default_handler() -> String {
    DEFAULT_HANDLER.to_string()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            url: None,
            base_url: None,
            core: None,
            handler: default_handler(),
        }
    }
}

impl HarnessConfig {
    /// Single-URL profile
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Base URL + core profile
    pub fn with_core(base_url: impl Into<String>, core: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            core: Some(core.into()),
            ..Self::default()
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Solr relevance harness configuration
#
# Either a complete service URL ...
url = "http://localhost:8983/solr/catalog"

# ... or a base URL plus a core name.
# base_url = "http://localhost:8983/solr"
# core = "catalog"

# Request handler used by default searches (default: "select")
handler = "select"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` for variable values
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = match var(ENV_CONFIG_FILE) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(url) = var(ENV_URL) {
            config.url = Some(url);
        }
        if let Some(base_url) = var(ENV_BASE_URL) {
            config.base_url = Some(base_url);
        }
        if let Some(core) = var(ENV_CORE) {
            config.core = Some(core);
        }
        if let Some(handler) = var(ENV_HANDLER) {
            config.handler = handler;
        }

        config.profile()?;
        Ok(config)
    }

    /// Resolve the connection profile
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when neither a URL nor a complete base + core
    /// pair is configured.
    pub fn profile(&self) -> Result<ConnectionProfile> {
        if let Some(url) = non_empty(&self.url) {
            return Ok(ConnectionProfile::Url(url.to_string()));
        }
        match (non_empty(&self.base_url), non_empty(&self.core)) {
            (Some(base_url), Some(core)) => Ok(ConnectionProfile::Core {
                base_url: base_url.to_string(),
                core: core.to_string(),
            }),
            (Some(_), None) => Err(Error::Config(format!(
                "{} is set but {} is missing",
                ENV_BASE_URL, ENV_CORE
            ))),
            (None, Some(_)) => Err(Error::Config(format!(
                "{} is set but {} is missing",
                ENV_CORE, ENV_BASE_URL
            ))),
            (None, None) => Err(Error::Config(format!(
                "no search service configured: set {} or {} and {}",
                ENV_URL, ENV_BASE_URL, ENV_CORE
            ))),
        }
    }
}
