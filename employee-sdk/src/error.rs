//! SDK error types and handling
//!
//! Every failure an employee operation can surface is a variant of [`SdkError`].
//! The variants keep "the upstream said no" (`NotFound`, `UpstreamRejected`,
//! `DeleteRejected`) apart from "the upstream kept throttling us"
//! (`RateLimitExhausted`) so callers can branch on them.

use thiserror::Error;

/// The main error type for the SDK
#[derive(Error, Debug)]
pub enum SdkError {
    /// The upstream reported that the resource does not exist
    #[error("Resource not found: {resource_type} with ID {resource_id}")]
    NotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Every attempt was rate limited and the retry budget is spent
    #[error("Rate limit still in effect after {attempts} attempts")]
    RateLimitExhausted { attempts: u32 },

    /// The upstream answered with a non-2xx status that is neither 404 nor 429
    #[error("Upstream rejected the request: {status} - {message}")]
    UpstreamRejected { status: u16, message: String },

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A 2xx envelope carried no data where data was required
    #[error("Upstream returned an empty payload: {0}")]
    EmptyPayload(String),

    /// The upstream did not confirm a delete
    #[error("Upstream did not confirm deletion of {name}")]
    DeleteRejected { name: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

/// Result type alias for SDK operations
pub type SdkResult<T> = Result<T, SdkError>;

/// Error body the upstream may send alongside a non-2xx status
#[derive(Debug, serde::Deserialize)]
struct UpstreamErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl SdkError {
    /// Build an `UpstreamRejected` error from a raw response body.
    ///
    /// The envelope's `error` field is preferred when the body parses, then
    /// its `status` tag, then the raw body text.
    pub fn rejected(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<UpstreamErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error.or(parsed.status))
            .unwrap_or_else(|| body.to_string());

        SdkError::UpstreamRejected { status, message }
    }

    /// Build a `NotFound` error for an employee id
    pub fn employee_not_found(id: impl Into<String>) -> Self {
        SdkError::NotFound {
            resource_type: "employee".to_string(),
            resource_id: id.into(),
        }
    }

    /// Check if the error is a not-found outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::NotFound { .. })
    }

    /// Check if the error is retry exhaustion
    pub fn is_exhausted(&self) -> bool {
        matches!(self, SdkError::RateLimitExhausted { .. })
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SdkError::NotFound { .. } => Some(404),
            SdkError::RateLimitExhausted { .. } => Some(429),
            SdkError::UpstreamRejected { status, .. } => Some(*status),
            SdkError::NetworkError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
