//! Retry executor with exponential backoff
//!
//! An attempt reports its result as a [`CallOutcome`]. The executor loops over
//! attempts, waiting between them only when the outcome is
//! [`CallOutcome::Retryable`], and gives up with
//! [`SdkError::RateLimitExhausted`] once the attempt budget is spent.
//!
//! # Example
//!
//! ```no_run
//! use employee_sdk::retry::{CallOutcome, RetryConfig, RetryExecutor};
//!
//! # async fn example() -> Result<(), employee_sdk::SdkError> {
//! let executor = RetryExecutor::new(RetryConfig::default());
//!
//! let value = executor
//!     .run("example", || async { CallOutcome::Success(42) })
//!     .await?;
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```

use crate::error::{SdkError, SdkResult};
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Default number of attempts, the first one included
pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;

/// Default wait before the second attempt
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(4000);

/// Default growth factor applied to the wait after every retryable failure
pub const DEFAULT_MULTIPLIER: u32 = 2;

/// Result of a single outbound attempt
#[derive(Debug)]
pub enum CallOutcome<T> {
    /// The attempt succeeded
    Success(T),
    /// The upstream throttled the attempt; it may be re-executed
    Retryable,
    /// The attempt failed in a way that must not be retried
    Permanent(SdkError),
}

impl<T> CallOutcome<T> {
    /// Transform the success value, leaving the other tags untouched
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CallOutcome<U> {
        match self {
            CallOutcome::Success(value) => CallOutcome::Success(f(value)),
            CallOutcome::Retryable => CallOutcome::Retryable,
            CallOutcome::Permanent(e) => CallOutcome::Permanent(e),
        }
    }
}

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts, the first one included
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub initial_delay: Duration,
    /// Multiplier applied to the delay after every retryable failure
    pub multiplier: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

impl RetryConfig {
    /// Delay before attempt `retry + 2`, i.e. after `retry + 1` throttled attempts.
    ///
    /// Saturates instead of overflowing for absurd attempt counts.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(retry);
        self.initial_delay.saturating_mul(factor)
    }

    /// All waits a fully throttled run performs, in order
    pub fn schedule(&self) -> Vec<Duration> {
        (0..self.max_attempts.saturating_sub(1))
            .map(|retry| self.delay_for(retry))
            .collect()
    }
}

/// Something that can suspend the current task for a while
#[async_trait]
pub trait Sleeper: Send + Sync + fmt::Debug {
    /// Wait for `delay`
    async fn sleep(&self, delay: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Runs an attempt repeatedly according to a [`RetryConfig`]
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    config: RetryConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl RetryExecutor {
    /// Create an executor that waits on the tokio timer
    pub fn new(config: RetryConfig) -> Self {
        Self::with_sleeper(config, Arc::new(TokioSleeper))
    }

    /// Create an executor with a custom sleeper
    pub fn with_sleeper(config: RetryConfig, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { config, sleeper }
    }

    /// Get the retry configuration
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute `action` until it yields a non-retryable outcome or the attempt
    /// budget runs out.
    ///
    /// `operation` only labels log lines.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut action: F) -> SdkResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CallOutcome<T>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut delay = self.config.initial_delay;
        let mut attempt = 1;

        loop {
            debug!("{}: attempt {}/{}", operation, attempt, max_attempts);

            match action().await {
                CallOutcome::Success(value) => {
                    if attempt > 1 {
                        debug!("{}: succeeded after {} attempts", operation, attempt);
                    }
                    return Ok(value);
                }
                CallOutcome::Permanent(e) => return Err(e),
                CallOutcome::Retryable if attempt >= max_attempts => {
                    error!(
                        "{}: still rate limited after {} attempts, giving up",
                        operation, attempt
                    );
                    return Err(SdkError::RateLimitExhausted { attempts: attempt });
                }
                CallOutcome::Retryable => {
                    info!(
                        "{}: rate limited (attempt {}/{}), waiting {:?}",
                        operation, attempt, max_attempts, delay
                    );
                    self.sleeper.sleep(delay).await;
                    delay = delay.saturating_mul(self.config.multiplier);
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingSleeper {
        delays: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        fn delays(&self) -> Vec<Duration> {
            self.delays.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, delay: Duration) {
            self.delays.lock().unwrap().push(delay);
        }
    }

    fn executor() -> (RetryExecutor, Arc<RecordingSleeper>) {
        let sleeper = Arc::new(RecordingSleeper::default());
        let executor = RetryExecutor::with_sleeper(RetryConfig::default(), sleeper.clone());
        (executor, sleeper)
    }

    /// Attempt that is throttled `throttled` times, then succeeds
    async fn throttled_then_ok(
        counter: &AtomicUsize,
        throttled: usize,
    ) -> CallOutcome<&'static str> {
        if counter.fetch_add(1, Ordering::Relaxed) < throttled {
            CallOutcome::Retryable
        } else {
            CallOutcome::Success("payload")
        }
    }

    #[tokio::test]
    async fn test_succeeds_immediately_without_waiting() {
        let (executor, sleeper) = executor();
        let counter = AtomicUsize::new(0);

        let result = executor
            .run("test", || throttled_then_ok(&counter, 0))
            .await
            .unwrap();

        assert_eq!(result, "payload");
        assert_eq!(counter.load(Ordering::Relaxed), 1);
        assert!(sleeper.delays().is_empty());
    }

    #[tokio::test]
    async fn test_waits_double_between_throttled_attempts() {
        for throttled in 1..6 {
            let (executor, sleeper) = executor();
            let counter = AtomicUsize::new(0);

            let result = executor
                .run("test", || throttled_then_ok(&counter, throttled))
                .await
                .unwrap();

            let expected: Vec<Duration> = (0..throttled as u32)
                .map(|i| Duration::from_millis(4000 * 2u64.pow(i)))
                .collect();

            assert_eq!(result, "payload");
            assert_eq!(counter.load(Ordering::Relaxed), throttled + 1);
            assert_eq!(sleeper.delays(), expected);
        }
    }

    #[tokio::test]
    async fn test_exhaustion_after_six_attempts_and_five_waits() {
        let (executor, sleeper) = executor();
        let counter = AtomicUsize::new(0);

        let result = executor
            .run("test", || throttled_then_ok(&counter, usize::MAX))
            .await;

        assert!(matches!(
            result,
            Err(SdkError::RateLimitExhausted { attempts: 6 })
        ));
        assert_eq!(counter.load(Ordering::Relaxed), 6);
        assert_eq!(
            sleeper.delays(),
            vec![
                Duration::from_secs(4),
                Duration::from_secs(8),
                Duration::from_secs(16),
                Duration::from_secs(32),
                Duration::from_secs(64),
            ]
        );
    }

    #[tokio::test]
    async fn test_permanent_failure_short_circuits() {
        let (executor, sleeper) = executor();
        let counter = AtomicUsize::new(0);

        let result: SdkResult<()> = executor
            .run("test", || {
                counter.fetch_add(1, Ordering::Relaxed);
                async { CallOutcome::Permanent(SdkError::employee_not_found("42")) }
            })
            .await;

        assert!(matches!(result, Err(SdkError::NotFound { .. })));
        assert_eq!(counter.load(Ordering::Relaxed), 1);
        assert!(sleeper.delays().is_empty());
    }

    #[tokio::test]
    async fn test_permanent_failure_after_throttling_stops_waiting() {
        let (executor, sleeper) = executor();
        let counter = AtomicUsize::new(0);

        let result: SdkResult<()> = executor
            .run("test", || {
                let n = counter.fetch_add(1, Ordering::Relaxed);
                async move {
                    if n == 0 {
                        CallOutcome::Retryable
                    } else {
                        CallOutcome::Permanent(SdkError::rejected(400, "bad request"))
                    }
                }
            })
            .await;

        assert!(matches!(
            result,
            Err(SdkError::UpstreamRejected { status: 400, .. })
        ));
        assert_eq!(sleeper.delays(), vec![Duration::from_secs(4)]);
    }

    #[tokio::test]
    async fn test_single_attempt_budget_never_waits() {
        let sleeper = Arc::new(RecordingSleeper::default());
        let executor = RetryExecutor::with_sleeper(
            RetryConfig {
                max_attempts: 1,
                ..Default::default()
            },
            sleeper.clone(),
        );

        let result: SdkResult<()> = executor.run("test", || async { CallOutcome::Retryable }).await;

        assert!(matches!(
            result,
            Err(SdkError::RateLimitExhausted { attempts: 1 })
        ));
        assert!(sleeper.delays().is_empty());
    }

    #[test]
    fn test_default_schedule() {
        assert_eq!(
            RetryConfig::default().schedule(),
            vec![
                Duration::from_secs(4),
                Duration::from_secs(8),
                Duration::from_secs(16),
                Duration::from_secs(32),
                Duration::from_secs(64),
            ]
        );
    }

    #[test]
    fn test_delay_saturates() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_for(200), config.delay_for(100));
        assert!(config.delay_for(200) > config.delay_for(5));
    }

    #[test]
    fn test_outcome_map() {
        let outcome = CallOutcome::Success(2).map(|n| n * 21);
        assert!(matches!(outcome, CallOutcome::Success(42)));

        let outcome: CallOutcome<i32> = CallOutcome::<i32>::Retryable.map(|n| n + 1);
        assert!(matches!(outcome, CallOutcome::Retryable));
    }
}
