//! HTTP client implementation
//!
//! This module provides the core HTTP client for the SDK: a single-attempt
//! invoker that classifies every upstream response, and the retrying `send`
//! built on top of it.

use crate::classify::{classify_status, classify_transport, Classification, FailureKind};
use crate::config::SdkConfig;
use crate::error::{SdkError, SdkResult};
use crate::retry::{CallOutcome, RetryExecutor, Sleeper, TokioSleeper};
use reqwest::{header, Client, Method};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, warn};
use url::Url;

/// The response wrapper the upstream puts around every payload:
/// `{ "data": T, "status": "...", "error": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Payload; `None` when absent or null
    pub data: Option<T>,
    /// Status tag, e.g. "Successfully processed request."
    pub status: Option<String>,
    /// Error message, if any
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Envelope around a payload
    pub fn new(data: T) -> Self {
        Self {
            data: Some(data),
            status: None,
            error: None,
        }
    }

    /// Envelope carrying no payload
    pub fn empty() -> Self {
        Self {
            data: None,
            status: None,
            error: None,
        }
    }

    /// Whether the payload is absent
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }
}

/// The HTTP client for making upstream requests
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    config: Arc<SdkConfig>,
    executor: RetryExecutor,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: SdkConfig) -> SdkResult<Self> {
        Self::with_sleeper(config, Arc::new(TokioSleeper))
    }

    /// Create a new HTTP client whose backoff waits go through `sleeper`
    pub fn with_sleeper(config: SdkConfig, sleeper: Arc<dyn Sleeper>) -> SdkResult<Self> {
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        for (name, value) in &config.custom_headers {
            let header_name = header::HeaderName::try_from(name.as_str()).map_err(|e| {
                SdkError::ConfigurationError(format!("Invalid header name {:?}: {}", name, e))
            })?;
            let header_value = header::HeaderValue::try_from(value.as_str()).map_err(|e| {
                SdkError::ConfigurationError(format!("Invalid value for header {}: {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }

        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(SdkError::ConfigurationError(format!(
                "Base URL cannot carry a path: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(SdkError::NetworkError)?;

        let executor = RetryExecutor::with_sleeper(config.retry.clone(), sleeper);

        Ok(Self {
            client,
            base_url,
            config: Arc::new(config),
            executor,
        })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Build the full URL for an endpoint.
    ///
    /// `segment` is appended as one percent-encoded path segment, so `?`, `#`
    /// and `/` in an id stay part of the path. An empty segment is the base URL.
    pub fn url(&self, segment: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            if !segment.is_empty() {
                segments.push(segment);
            }
        }
        url
    }

    /// Issue a request through the retry executor.
    ///
    /// Rate-limited attempts are retried with backoff; every other outcome is
    /// returned as soon as it is seen.
    pub async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> SdkResult<ApiEnvelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let operation = format!("{} {}", method, self.url(path));
        self.executor
            .run(&operation, move || self.invoke(method.clone(), path, body))
            .await
    }

    /// Execute exactly one attempt and classify it.
    ///
    /// Never sleeps and never loops.
    pub async fn invoke<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> CallOutcome<ApiEnvelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let mut request = self.client.request(method.clone(), url.clone());

        if let Some(body) = body {
            request = request.json(body);
        }

        if self.config.enable_logging {
            debug!("Request: {} {}", method, url);
            if let Some(body) = body {
                if let Ok(body_str) = serde_json::to_string(body) {
                    debug!("Request body: {}", body_str);
                }
            }
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Request {} {} failed: {}", method, url, e);
                return match classify_transport(&e) {
                    Classification::RateLimited => CallOutcome::Retryable,
                    _ => CallOutcome::Permanent(SdkError::NetworkError(e)),
                };
            }
        };

        let status = response.status();
        let classification = classify_status(status);

        if classification.is_retryable() {
            warn!("Rate limit (429) encountered on {} {}", method, url);
            return CallOutcome::Retryable;
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return CallOutcome::Permanent(SdkError::NetworkError(e)),
        };

        if self.config.enable_logging {
            debug!("Response {}: {}", status, text);
        }

        match classification {
            Classification::Success => {}
            Classification::Permanent(FailureKind::NotFound) => {
                debug!("{} {} returned 404", method, url);
                return CallOutcome::Permanent(SdkError::NotFound {
                    resource_type: "resource".to_string(),
                    resource_id: path.to_string(),
                });
            }
            _ => {
                warn!("{} {} rejected with {}", method, url, status);
                return CallOutcome::Permanent(SdkError::rejected(status.as_u16(), &text));
            }
        }

        if text.trim().is_empty() {
            return CallOutcome::Success(ApiEnvelope::empty());
        }

        match serde_json::from_str(&text) {
            Ok(envelope) => CallOutcome::Success(envelope),
            Err(e) => {
                error!("Could not parse response from {} {}: {}", method, url, e);
                CallOutcome::Permanent(SdkError::SerializationError(e))
            }
        }
    }
}
