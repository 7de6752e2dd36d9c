//! Orchestrator settings.
//!
//! Settings come from the optional `orchestrator` section of a registry
//! document and can be overridden from the environment:
//!
//! - `GATEHOUSE_DEFAULT_TIMEOUT_MS`: per-agent timeout in milliseconds
//! - `GATEHOUSE_MAX_CONCURRENCY`: maximum agents called at once in a fan-out

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding [`OrchestratorSettings::default_timeout`].
pub const DEFAULT_TIMEOUT_ENV: &str = "GATEHOUSE_DEFAULT_TIMEOUT_MS";
/// Environment variable overriding [`OrchestratorSettings::max_concurrency`].
pub const MAX_CONCURRENCY_ENV: &str = "GATEHOUSE_MAX_CONCURRENCY";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Errors returned while loading or validating settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds something other than a positive integer.
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// The default timeout is zero.
    #[error("default timeout must be greater than zero")]
    ZeroTimeout,

    /// The concurrency limit is zero.
    #[error("max concurrency must be greater than zero")]
    ZeroConcurrency,
}

/// Tunables for the agent orchestrator.
///
/// ```json
/// { "default_timeout_ms": 30000, "max_concurrency": 8 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrchestratorSettings {
    /// Timeout applied when a request does not set its own.
    #[serde(
        rename = "default_timeout_ms",
        serialize_with = "serialize_millis",
        deserialize_with = "deserialize_millis"
    )]
    pub default_timeout: Duration,
    /// Maximum number of agents called at once.
    pub max_concurrency: usize,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            default_timeout: DEFAULT_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl OrchestratorSettings {
    /// Applies environment overrides on top of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] when a variable is set but is not
    /// a positive integer.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from an arbitrary lookup, such as the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] when a value is set but is not a
    /// positive integer.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(millis) = positive_integer(&lookup, DEFAULT_TIMEOUT_ENV)? {
            self.default_timeout = Duration::from_millis(millis);
        }
        if let Some(limit) = positive_integer(&lookup, MAX_CONCURRENCY_ENV)? {
            self.max_concurrency =
                usize::try_from(limit).map_err(|_| ConfigError::InvalidEnv {
                    name: MAX_CONCURRENCY_ENV,
                    value: limit.to_string(),
                })?;
        }
        Ok(self)
    }

    /// Returns the defaults with environment overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for malformed variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Checks the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] or
    /// [`ConfigError::ZeroConcurrency`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.default_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}

fn positive_integer(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(ConfigError::InvalidEnv { name, value: raw }),
    }
}

fn serialize_millis<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
}

fn deserialize_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}
