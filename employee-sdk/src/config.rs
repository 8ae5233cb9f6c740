//! SDK configuration
//!
//! This module provides configuration options for the SDK client.

use crate::error::{SdkError, SdkResult};
use crate::retry::RetryConfig;
use std::time::Duration;

/// Upstream employee endpoint used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8112/api/v1/employee";

/// Configuration for the SDK client
#[derive(Debug, Clone)]
pub struct SdkConfig {
    /// Base URL of the upstream employee endpoint
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Retry policy applied to rate-limited calls
    pub retry: RetryConfig,

    /// User agent string
    pub user_agent: String,

    /// Enable request/response logging
    pub enable_logging: bool,

    /// Custom headers to add to all requests
    pub custom_headers: Vec<(String, String)>,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
            user_agent: format!("employee-sdk/{}", env!("CARGO_PKG_VERSION")),
            enable_logging: false,
            custom_headers: Vec::new(),
        }
    }
}

impl SdkConfig {
    /// Create a new configuration with the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Create a new builder with the given base URL
    pub fn builder(base_url: impl Into<String>) -> SdkConfigBuilder {
        SdkConfigBuilder {
            config: Self::new(base_url),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Replace the whole retry policy
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Set the maximum number of attempts
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.retry.max_attempts = max_attempts;
        self
    }

    /// Set the retry backoff configuration
    pub fn with_retry_backoff(mut self, initial: Duration, multiplier: u32) -> Self {
        self.retry.initial_delay = initial;
        self.retry.multiplier = multiplier;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable request/response logging
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }

    /// Add a custom header to all requests
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> SdkResult<()> {
        if self.base_url.is_empty() {
            return Err(SdkError::ConfigurationError(
                "Base URL cannot be empty".to_string(),
            ));
        }

        // Validate URL format
        url::Url::parse(&self.base_url)?;

        if self.timeout.is_zero() {
            return Err(SdkError::ConfigurationError(
                "Timeout cannot be zero".to_string(),
            ));
        }

        if self.retry.max_attempts == 0 {
            return Err(SdkError::ConfigurationError(
                "At least one attempt is required".to_string(),
            ));
        }

        if self.retry.multiplier == 0 {
            return Err(SdkError::ConfigurationError(
                "Backoff multiplier cannot be zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for SDK configuration
#[derive(Debug, Default)]
pub struct SdkConfigBuilder {
    config: SdkConfig,
}

impl SdkConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set max attempts
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.retry.max_attempts = attempts;
        self
    }

    /// Set the delay before the first retry
    pub fn initial_backoff(mut self, delay: Duration) -> Self {
        self.config.retry.initial_delay = delay;
        self
    }

    /// Set the backoff multiplier
    pub fn backoff_multiplier(mut self, multiplier: u32) -> Self {
        self.config.retry.multiplier = multiplier;
        self
    }

    /// Enable logging
    pub fn logging(mut self, enable: bool) -> Self {
        self.config.enable_logging = enable;
        self
    }

    /// Add a custom header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Build the configuration
    pub fn build(self) -> SdkConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = SdkConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.retry.max_attempts, 6);
        assert_eq!(config.retry.initial_delay, Duration::from_millis(4000));
        assert_eq!(config.retry.multiplier, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SdkConfigBuilder::new()
            .base_url("http://upstream.test/api/v1/employee")
            .max_attempts(3)
            .initial_backoff(Duration::from_millis(10))
            .timeout(Duration::from_secs(60))
            .build();

        assert_eq!(config.base_url, "http://upstream.test/api/v1/employee");
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.initial_delay, Duration::from_millis(10));
        assert_eq!(config.retry.multiplier, 2);
    }

    #[test]
    fn test_invalid_config() {
        assert!(SdkConfig::new("").validate().is_err());
        assert!(SdkConfig::new("not a url").validate().is_err());
        assert!(SdkConfig::default().with_max_attempts(0).validate().is_err());
        assert!(SdkConfig::default()
            .with_retry_backoff(Duration::from_secs(1), 0)
            .validate()
            .is_err());
        assert!(SdkConfig::default()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }
}
