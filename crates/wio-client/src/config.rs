//! # Gateway Configuration
//!
//! Configuration for the WioPayments client.
//! Values come from explicit builders, environment variables, or a TOML document,
//! and never change after the client is built.

use serde::Deserialize;
use std::env;
use std::time::Duration;
use url::Url;
use wio_core::{WioError, WioResult};

/// Production gateway
pub const DEFAULT_BASE_URL: &str = "https://gw.wiopayments.com";

/// Request timeout when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Gateway client configuration
#[derive(Clone, Deserialize)]
pub struct WioConfig {
    /// Site API key from the WioPayments dashboard
    pub api_key: String,

    /// API base URL (override for sandboxes and mocks)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Verify the gateway's TLS certificate. Only turn off against test servers.
    #[serde(default = "default_true")]
    pub verify_tls: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

impl WioConfig {
    /// Create config with an API key and production defaults
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verify_tls: true,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `WIO_API_KEY`
    ///
    /// Optional:
    /// - `WIO_BASE_URL` (default `https://gw.wiopayments.com`)
    /// - `WIO_TIMEOUT_SECS` (default 30)
    /// - `WIO_VERIFY_TLS` (default true)
    pub fn from_env() -> WioResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value source shaped like the environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> WioResult<Self> {
        let api_key = lookup("WIO_API_KEY")
            .ok_or_else(|| WioError::Configuration("WIO_API_KEY not set".to_string()))?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup("WIO_BASE_URL") {
            config.base_url = base_url;
        }

        if let Some(timeout) = lookup("WIO_TIMEOUT_SECS") {
            config.timeout_secs = timeout.trim().parse().map_err(|_| {
                WioError::Configuration(format!("WIO_TIMEOUT_SECS is not a number: {}", timeout))
            })?;
        }

        if let Some(verify) = lookup("WIO_VERIFY_TLS") {
            config.verify_tls = parse_bool(&verify).ok_or_else(|| {
                WioError::Configuration(format!("WIO_VERIFY_TLS is not a boolean: {}", verify))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML document
    ///
    /// ```toml
    /// api_key = "wio_..."
    /// base_url = "https://gw.wiopayments.com"
    /// timeout_secs = 30
    /// verify_tls = true
    /// ```
    pub fn from_toml(toml_str: &str) -> WioResult<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| WioError::Configuration(format!("Invalid TOML config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a client cannot work without
    pub fn validate(&self) -> WioResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(WioError::Configuration("API key is empty".to_string()));
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            WioError::Configuration(format!("Invalid base URL {}: {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(WioError::Configuration(format!(
                "Base URL must be an http(s) URL: {}",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(WioError::Configuration(
                "Timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL with any trailing slash removed
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder: set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Builder: toggle TLS certificate verification
    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }
}

// Keep the API key out of logs and panics.
impl std::fmt::Debug for WioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WioConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = WioConfig::new("wio_test_key");
        assert_eq!(config.base_url, "https://gw.wiopayments.com");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.verify_tls);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_auth_header() {
        let config = WioConfig::new("wio_test_key");
        assert_eq!(config.auth_header(), "Bearer wio_test_key");
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = WioConfig::new("k").with_base_url("http://localhost:8080//");
        assert_eq!(config.trimmed_base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_from_lookup() {
        let config = WioConfig::from_lookup(lookup(&[
            ("WIO_API_KEY", "wio_abc"),
            ("WIO_BASE_URL", "http://127.0.0.1:9000"),
            ("WIO_TIMEOUT_SECS", "5"),
            ("WIO_VERIFY_TLS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "wio_abc");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_secs, 5);
        assert!(!config.verify_tls);
    }

    #[test]
    fn test_from_lookup_missing_key() {
        let err = WioConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, WioError::Configuration(_)));
    }

    #[test]
    fn test_from_lookup_bad_values() {
        let err = WioConfig::from_lookup(lookup(&[("WIO_API_KEY", "k"), ("WIO_TIMEOUT_SECS", "soon")]));
        assert!(err.is_err());

        let err = WioConfig::from_lookup(lookup(&[("WIO_API_KEY", "k"), ("WIO_VERIFY_TLS", "maybe")]));
        assert!(err.is_err());

        let err = WioConfig::from_lookup(lookup(&[("WIO_API_KEY", "k"), ("WIO_BASE_URL", "ftp://gw")]));
        assert!(err.is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = WioConfig::from_toml(
            r#"
            api_key = "wio_toml"
            timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.api_key, "wio_toml");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
        assert!(config.verify_tls);

        assert!(WioConfig::from_toml("timeout_secs = 10").is_err());
        assert!(WioConfig::from_toml("api_key = \"k\"\ntimeout_secs = 0").is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", WioConfig::new("wio_secret_value"));
        assert!(!rendered.contains("wio_secret_value"));
        assert!(rendered.contains("<redacted>"));
    }
}
