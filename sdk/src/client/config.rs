//! Client configuration.
//!
//! Provides configuration options for the HTTP client.

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::Url;

use super::error::ClientError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "API-Key";

/// Client configuration.
///
/// The public and admin base URLs are independent; an operation whose
/// audience has no URL fails before sending anything.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the public (affiliate) API.
    pub base_url: Option<String>,

    /// Base URL of the admin API.
    pub admin_url: Option<String>,

    /// API key sent with every request.
    pub api_key: String,

    /// Request timeout.
    pub timeout: Duration,

    /// Connect timeout.
    pub connect_timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            admin_url: None,
            api_key: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: format!("affise-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("admin_url", &self.admin_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a new configuration with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Sets the public API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the admin API base URL.
    #[must_use]
    pub fn with_admin_url(mut self, admin_url: impl Into<String>) -> Self {
        self.admin_url = Some(admin_url.into());
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.base_url.is_none() && self.admin_url.is_none() {
            return Err(ClientError::InvalidConfig(
                "at least one of base_url or admin_url must be set".to_string(),
            ));
        }

        if let Some(ref base_url) = self.base_url {
            parse_base_url("base_url", base_url)?;
        }

        if let Some(ref admin_url) = self.admin_url {
            parse_base_url("admin_url", admin_url)?;
        }

        if HeaderValue::from_str(&self.api_key).is_err() {
            return Err(ClientError::InvalidConfig(
                "api_key contains characters not allowed in a header".to_string(),
            ));
        }

        if HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(ClientError::InvalidConfig(
                "user_agent contains characters not allowed in a header".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(ClientError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Parses a configured base URL.
pub(crate) fn parse_base_url(name: &str, value: &str) -> Result<Url, ClientError> {
    if value.is_empty() {
        return Err(ClientError::InvalidConfig(format!("{name} cannot be empty")));
    }

    let url = Url::parse(value)
        .map_err(|e| ClientError::InvalidConfig(format!("{name} is not a valid URL: {e}")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ClientError::InvalidConfig(format!(
            "{name} must start with http:// or https://"
        )));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert!(config.base_url.is_none());
        assert!(config.admin_url.is_none());
        assert!(config.api_key.is_empty());
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.user_agent.starts_with("affise-sdk/"));
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("my-api-key")
            .with_base_url("https://api-demo.affise.com")
            .with_admin_url("https://api-admin.affise.com")
            .with_timeout(Duration::from_secs(60))
            .with_connect_timeout(Duration::from_secs(5))
            .with_user_agent("my-app/1.0");

        assert_eq!(config.api_key, "my-api-key");
        assert_eq!(config.base_url.as_deref(), Some("https://api-demo.affise.com"));
        assert_eq!(config.admin_url.as_deref(), Some("https://api-admin.affise.com"));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "my-app/1.0");
    }

    #[test]
    fn test_config_validate_valid() {
        let config = ClientConfig::new("key").with_base_url("https://api.example.com");
        assert!(config.validate().is_ok());

        let config = ClientConfig::new("key").with_admin_url("http://127.0.0.1:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_no_urls() {
        assert!(ClientConfig::new("key").validate().is_err());
    }

    #[test]
    fn test_config_validate_empty_url() {
        let config = ClientConfig::new("key").with_base_url("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_invalid_scheme() {
        let config = ClientConfig::new("key").with_admin_url("ftp://api.example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_bad_api_key() {
        let config = ClientConfig::new("key\nwith-newline").with_base_url("https://api.example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_zero_timeout() {
        let config = ClientConfig::new("key")
            .with_base_url("https://api.example.com")
            .with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_debug_redacts_api_key() {
        let config = ClientConfig::new("secret").with_base_url("https://api.example.com");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
