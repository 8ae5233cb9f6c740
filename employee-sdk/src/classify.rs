//! Upstream outcome classification
//!
//! The single source of truth for retry eligibility: only a rate-limited
//! response is retryable. Everything else is either a success or a permanent
//! failure the caller has to deal with.

use reqwest::StatusCode;

/// Why a permanent failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The upstream does not know the resource
    NotFound,
    /// Any other rejection or transport failure
    Other,
}

/// Classification of a single outbound attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// 2xx, whatever the payload looks like
    Success,
    /// 429 Too Many Requests
    RateLimited,
    /// Must not be retried
    Permanent(FailureKind),
}

impl Classification {
    /// Whether the retry executor may re-attempt this outcome
    pub fn is_retryable(self) -> bool {
        matches!(self, Classification::RateLimited)
    }
}

/// Classify an HTTP status returned by the upstream
pub fn classify_status(status: StatusCode) -> Classification {
    match status {
        s if s.is_success() => Classification::Success,
        StatusCode::TOO_MANY_REQUESTS => Classification::RateLimited,
        StatusCode::NOT_FOUND => Classification::Permanent(FailureKind::NotFound),
        _ => Classification::Permanent(FailureKind::Other),
    }
}

/// Classify a transport failure.
///
/// A response the client could not obtain is never treated as rate limiting.
pub fn classify_transport(_error: &reqwest::Error) -> Classification {
    Classification::Permanent(FailureKind::Other)
}
