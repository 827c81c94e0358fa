//! Process configuration, read once at startup.
//!
//! Everything the notifier and dispatcher need lives in one explicit struct
//! that callers construct (or load from TOML) and pass by reference. There is
//! no ambient global state.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Credentials and endpoints for the relay notifier. Optional so that
    /// report-only runs (`--dry-run`) work without credentials on disk.
    pub notifier: Option<NotifierConfig>,

    #[serde(default)]
    pub probe: ProbeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifierConfig {
    /// Signing key for published events, nsec or hex.
    pub private_key: String,

    /// Relay endpoints the report is published to.
    pub relay_urls: Vec<String>,

    /// Disables TLS certificate verification for relay connections.
    ///
    /// Off by default. Some self-hosted relays run with certificates that do
    /// not verify; opting in is an explicit trade-off the operator makes in
    /// the config file, and it is logged loudly when active.
    #[serde(default)]
    pub danger_accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// Per-peer TCP connect timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of probes allowed in flight at once. The report stays in input
    /// order no matter what this is set to.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_concurrency() -> usize {
    1
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            concurrency: default_concurrency(),
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Loads and validates a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe.timeout_secs == 0 {
            return Err(ConfigError::Invalid("probe.timeout_secs must be > 0".into()));
        }
        if self.probe.concurrency == 0 {
            return Err(ConfigError::Invalid("probe.concurrency must be > 0".into()));
        }
        if let Some(notifier) = &self.notifier {
            if notifier.private_key.trim().is_empty() {
                return Err(ConfigError::Invalid("notifier.private_key is empty".into()));
            }
            if notifier.relay_urls.is_empty() {
                return Err(ConfigError::Invalid("notifier.relay_urls is empty".into()));
            }
        }
        Ok(())
    }

    /// The notifier section, or an error for runs that need to publish.
    pub fn notifier(&self) -> Result<&NotifierConfig, ConfigError> {
        self.notifier
            .as_ref()
            .ok_or_else(|| ConfigError::Invalid("missing [notifier] section".into()))
    }
}
