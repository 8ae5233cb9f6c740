use anyhow::Result;
use config::{Config as ConfigLoader, Environment, File};
use employee_sdk::{retry, RetryConfig, SdkConfig, DEFAULT_BASE_URL};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_LOG_FILTER: &str =
    "employee_facade=debug,employee_api=debug,employee_sdk=debug,tower_http=debug";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub port: u16,
    pub upstream_url: String,
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: u32,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let config = ConfigLoader::builder()
            .set_default("port", i64::from(defaults.port))?
            .set_default("upstream_url", defaults.upstream_url)?
            .set_default("max_attempts", i64::from(defaults.max_attempts))?
            .set_default("initial_backoff_ms", defaults.initial_backoff_ms as i64)?
            .set_default("backoff_multiplier", i64::from(defaults.backoff_multiplier))?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .set_default("log_level", defaults.log_level)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("EMPLOYEE_FACADE").try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Client configuration for the upstream employee API
    pub fn sdk_config(&self) -> Result<SdkConfig> {
        let config = SdkConfig::new(self.upstream_url.clone())
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_retry(RetryConfig {
                max_attempts: self.max_attempts,
                initial_delay: Duration::from_millis(self.initial_backoff_ms),
                multiplier: self.backoff_multiplier,
            });

        config.validate()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8111,
            upstream_url: DEFAULT_BASE_URL.to_string(),
            max_attempts: retry::DEFAULT_MAX_ATTEMPTS,
            initial_backoff_ms: retry::DEFAULT_INITIAL_DELAY.as_millis() as u64,
            backoff_multiplier: retry::DEFAULT_MULTIPLIER,
            request_timeout_secs: 30,
            log_level: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
