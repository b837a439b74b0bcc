//! Bounded retry with a fixed delay.
//!
//! Every network call that may be repeated safely goes through
//! [`RetryConfig::run`]. Failures are logged and swallowed: the caller gets
//! the operation's value or `None`, never the underlying error.

use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Configuration for automatic retries.
///
/// `max_attempts` counts the first attempt, so the default of 3 means one
/// call plus two retries, each preceded by `delay`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts, including the first
    pub max_attempts: u32,
    /// Wait between two attempts
    pub delay: Duration,
    /// HTTP status codes treated as failures by idempotent requests
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
            retry_statuses: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Create a configuration that makes a single attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Set the total number of attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the delay between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the HTTP status codes that count as failures.
    pub fn with_retry_statuses(mut self, statuses: Vec<u16>) -> Self {
        self.retry_statuses = statuses;
        self
    }

    /// Check if a status code should be retried.
    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Run `f` until it succeeds or the attempts are used up.
    ///
    /// `operation` names the call in log lines.
    pub async fn run<T, E, F, Fut>(&self, operation: &str, f: F) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        self.run_if(operation, f, |_| true).await
    }

    /// Like [`run`](Self::run), but gives up as soon as `should_retry`
    /// returns `false` for a failure.
    pub async fn run_if<T, E, F, Fut, P>(&self, operation: &str, f: F, should_retry: P) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
        P: FnMut(&E) -> bool,
    {
        self.try_run_if(operation, f, should_retry).await.ok()
    }

    /// Like [`run_if`](Self::run_if), but hands back the last failure.
    ///
    /// The error is `None` only when `max_attempts` is zero and `f` was
    /// never called.
    pub async fn try_run_if<T, E, F, Fut, P>(
        &self,
        operation: &str,
        mut f: F,
        mut should_retry: P,
    ) -> Result<T, Option<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
        P: FnMut(&E) -> bool,
    {
        let max = self.max_attempts;
        let mut last_error = None;

        for attempt in 1..=max {
            let err = match f().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !should_retry(&err) {
                tracing::error!(
                    operation,
                    attempt,
                    "API call failed: {}. Giving up: error is not retryable",
                    err
                );
                return Err(Some(err));
            }

            if attempt < max {
                tracing::error!(
                    operation,
                    attempt,
                    max_attempts = max,
                    "API call failed: {}. Retrying {}/{}...",
                    err,
                    attempt,
                    max
                );
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
            } else {
                tracing::error!(
                    operation,
                    attempt,
                    max_attempts = max,
                    "API call failed: {}. No attempts left ({}/{})",
                    err,
                    attempt,
                    max
                );
            }
            last_error = Some(err);
        }

        tracing::error!(operation, "All retries failed.");
        Err(last_error)
    }
}

/// Call `f` with up to `retries` total attempts, waiting `delay` between
/// them.
pub async fn call_with_retry<T, E, F, Fut>(f: F, retries: u32, delay: Duration) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    RetryConfig::default()
        .with_max_attempts(retries)
        .with_delay(delay)
        .run("call", f)
        .await
}
