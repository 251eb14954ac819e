//! Tiingo adapter configuration.

use std::time::Duration;

/// Production URL of the supported-tickers archive.
const DEFAULT_CATALOG_URL: &str =
    "https://apimedia.tiingo.com/docs/tiingo/daily/supported_tickers.zip";

/// Production base URL of the daily-prices API.
const DEFAULT_EOD_BASE_URL: &str = "https://api.tiingo.com";

/// Configuration for the Tiingo HTTP client.
#[derive(Clone)]
pub struct TiingoConfig {
    /// API key sent as the `token` query parameter.
    pub api_key: String,
    /// URL of the full catalog archive.
    pub catalog_url: String,
    /// Base URL for per-instrument price requests.
    pub eod_base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl TiingoConfig {
    /// Create a configuration against the production endpoints.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            eod_base_url: DEFAULT_EOD_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the catalog archive URL.
    #[must_use]
    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    /// Override the daily-prices base URL.
    #[must_use]
    pub fn with_eod_base_url(mut self, url: impl Into<String>) -> Self {
        self.eod_base_url = url.into();
        self
    }

    /// Override the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for TiingoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiingoConfig")
            .field("api_key", &"[REDACTED]")
            .field("catalog_url", &self.catalog_url)
            .field("eod_base_url", &self.eod_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let config = TiingoConfig::new("token-123");
        assert!(config.catalog_url.contains("supported_tickers.zip"));
        assert!(config.eod_base_url.contains("api.tiingo.com"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn base_urls_are_overridable() {
        let config = TiingoConfig::new("token-123")
            .with_catalog_url("http://localhost:1234/catalog.zip")
            .with_eod_base_url("http://localhost:1234")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.catalog_url, "http://localhost:1234/catalog.zip");
        assert_eq!(config.eod_base_url, "http://localhost:1234");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn debug_redacts_the_api_key() {
        let config = TiingoConfig::new("secret-token");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
