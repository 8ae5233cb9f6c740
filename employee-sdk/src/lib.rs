//! Employee SDK
//!
//! This crate provides a resilient Rust client for an upstream employee API.
//! Every call goes through a single-attempt invoker that classifies the
//! upstream response, and a retry executor that backs off exponentially while
//! the upstream keeps answering 429 Too Many Requests.
//!
//! # Features
//!
//! - **Outcome classification**: success, not-found, other rejection or rate-limited
//! - **Exponential backoff**: 6 attempts, 4s initial delay, doubling (configurable)
//! - **Distinct exhaustion error**: "kept throttling us" is never confused with "said no"
//! - **Employee operations**: list, get, create, two-phase delete
//! - **Derived queries**: name search, highest salary, top earners
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use employee_sdk::{EmployeeApiClient, SdkConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SdkConfig::new("http://localhost:8112/api/v1/employee");
//!     let client = EmployeeApiClient::new(config)?;
//!
//!     let employees = client.employees().list().await?;
//!     println!("Found {} employees", employees.len());
//!
//!     let top = client.employees().top_ten_earning_names().await?;
//!     println!("Top earners: {:?}", top);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! ```rust,no_run
//! use employee_sdk::{EmployeeApiClient, SdkError};
//!
//! async fn handle_errors(client: &EmployeeApiClient, id: &str) {
//!     match client.employees().get(id).await {
//!         Ok(employee) => println!("Got {}", employee.name),
//!         Err(SdkError::NotFound { resource_id, .. }) => {
//!             eprintln!("No employee with id {}", resource_id)
//!         }
//!         Err(SdkError::RateLimitExhausted { attempts }) => {
//!             eprintln!("Still rate limited after {} attempts", attempts)
//!         }
//!         Err(e) => eprintln!("Other error: {}", e),
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod queries;
pub mod resources;
pub mod retry;

// Re-export main types for convenience
pub use classify::{Classification, FailureKind};
pub use client::{ApiEnvelope, HttpClient};
pub use config::{SdkConfig, SdkConfigBuilder, DEFAULT_BASE_URL};
pub use error::{SdkError, SdkResult};
pub use resources::employees::{
    CreateEmployeeInput, DeleteEmployeeInput, Employee, EmployeesClient,
};
pub use retry::{CallOutcome, RetryConfig, RetryExecutor, Sleeper, TokioSleeper};

use std::sync::Arc;

/// The main client for the upstream employee API.
///
/// # Example
///
/// ```rust,no_run
/// use employee_sdk::{EmployeeApiClient, SdkConfig};
///
/// let client = EmployeeApiClient::new(SdkConfig::default())?;
/// let employees = client.employees();
/// # Ok::<(), employee_sdk::SdkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EmployeeApiClient {
    http_client: Arc<HttpClient>,
    employees: EmployeesClient,
}

impl EmployeeApiClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: SdkConfig) -> SdkResult<Self> {
        Ok(Self::from_http_client(HttpClient::new(config)?))
    }

    /// Create a new client whose backoff waits go through `sleeper`
    pub fn with_sleeper(config: SdkConfig, sleeper: Arc<dyn Sleeper>) -> SdkResult<Self> {
        Ok(Self::from_http_client(HttpClient::with_sleeper(
            config, sleeper,
        )?))
    }

    fn from_http_client(http_client: HttpClient) -> Self {
        let http_client = Arc::new(http_client);
        Self {
            employees: EmployeesClient::new(Arc::clone(&http_client)),
            http_client,
        }
    }

    /// Create a new client using a builder pattern.
    ///
    /// ```rust,no_run
    /// use employee_sdk::EmployeeApiClient;
    /// use std::time::Duration;
    ///
    /// let client = EmployeeApiClient::builder("http://localhost:8112/api/v1/employee")
    ///     .with_max_attempts(3)
    ///     .with_timeout(Duration::from_secs(5))
    ///     .build()?;
    /// # Ok::<(), employee_sdk::SdkError>(())
    /// ```
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Get the employees client
    pub fn employees(&self) -> &EmployeesClient {
        &self.employees
    }

    /// Get a reference to the underlying HTTP client.
    ///
    /// This is useful for making custom requests not covered by the resource clients.
    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Get the base URL of the upstream API
    pub fn base_url(&self) -> &str {
        &self.http_client.config().base_url
    }
}

/// Builder for creating an EmployeeApiClient with fluent configuration.
#[derive(Debug)]
pub struct ClientBuilder {
    config_builder: SdkConfigBuilder,
}

impl ClientBuilder {
    /// Create a new client builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            config_builder: SdkConfig::builder(base_url),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.connect_timeout(timeout);
        self
    }

    /// Set the maximum number of attempts.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.config_builder = self.config_builder.max_attempts(max_attempts);
        self
    }

    /// Set the delay before the first retry and its growth factor.
    pub fn with_backoff(mut self, initial: std::time::Duration, multiplier: u32) -> Self {
        self.config_builder = self
            .config_builder
            .initial_backoff(initial)
            .backoff_multiplier(multiplier);
        self
    }

    /// Enable or disable request/response logging.
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.config_builder = self.config_builder.logging(enable);
        self
    }

    /// Add a custom header to all requests.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.header(name, value);
        self
    }

    /// Build the client.
    pub fn build(self) -> SdkResult<EmployeeApiClient> {
        EmployeeApiClient::new(self.config_builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = EmployeeApiClient::builder("http://localhost:8112/api/v1/employee")
            .with_timeout(std::time::Duration::from_secs(30))
            .with_max_attempts(3)
            .with_backoff(std::time::Duration::from_millis(50), 3)
            .with_logging(true)
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "http://localhost:8112/api/v1/employee");
        assert_eq!(client.http_client().config().retry.max_attempts, 3);
        assert_eq!(client.http_client().config().retry.multiplier, 3);
    }

    #[test]
    fn test_client_rejects_bad_config() {
        let result = EmployeeApiClient::builder("").build();
        assert!(matches!(result, Err(SdkError::ConfigurationError(_))));
    }
}
