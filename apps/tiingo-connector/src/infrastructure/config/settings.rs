//! Subscription identity and typed access to its configuration map.
//!
//! Subscriptions are loaded and scheduled by the orchestrator; the
//! connector only consumes them. Configuration arrives as a string map
//! (`apiKey`, `rateLimit`) and is validated here rather than at the call
//! sites that need the values.

use std::collections::HashMap;

/// Configuration key holding the provider API key.
const API_KEY: &str = "apiKey";

/// Configuration key holding the request budget in requests per minute.
const RATE_LIMIT: &str = "rateLimit";

/// Request budget applied when `rateLimit` is unset or non-positive.
pub const DEFAULT_RATE_LIMIT: u32 = 5_000;

/// One scheduled dataset subscription.
#[derive(Debug, Clone)]
pub struct Subscription {
    /// Stable subscription identifier.
    pub id: String,
    /// Human-readable subscription name.
    pub name: String,
    /// Dataset scope passed to the storage collaborator, when set.
    pub dataset: Option<String>,
    /// Raw configuration values supplied by the orchestrator.
    pub config: HashMap<String, String>,
}

impl Subscription {
    /// Create a subscription with an empty configuration map.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dataset: None,
            config: HashMap::new(),
        }
    }

    /// Set a configuration value.
    #[must_use]
    pub fn with_config_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Scope the subscription to a named dataset.
    #[must_use]
    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }

    /// Get the provider API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] if the key is absent or empty.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        match self.config.get(API_KEY) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::MissingValue(API_KEY.to_string())),
        }
    }

    /// Get the request budget in requests per minute.
    ///
    /// Unset or non-positive values fall back to [`DEFAULT_RATE_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the value is present but is
    /// not an integer.
    pub fn rate_limit(&self) -> Result<u32, ConfigError> {
        let Some(raw) = self.config.get(RATE_LIMIT) else {
            return Ok(DEFAULT_RATE_LIMIT);
        };

        if raw.is_empty() {
            return Ok(DEFAULT_RATE_LIMIT);
        }

        let parsed: i64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: RATE_LIMIT.to_string(),
            value: raw.clone(),
        })?;

        if parsed <= 0 {
            return Ok(DEFAULT_RATE_LIMIT);
        }

        Ok(u32::try_from(parsed).unwrap_or(DEFAULT_RATE_LIMIT))
    }
}

/// Subscription configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required configuration value is missing or empty.
    #[error("missing required configuration value: {0}")]
    MissingValue(String),
    /// A configuration value has the wrong shape.
    #[error("configuration value {key} is not an integer: {value}")]
    InvalidValue {
        /// The offending configuration key.
        key: String,
        /// The raw value that failed to parse.
        value: String,
    },
}
