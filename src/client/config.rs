//! Client configuration options.

use std::time::Duration;

use crate::retry::RetryConfig;

/// Production REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.tdameritrade.com";

/// Configuration for the TD Ameritrade client.
///
/// # Example
///
/// ```
/// use tdameritrade_rs::{ClientConfig, OrderRetryPolicy};
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(10))
///     .with_order_retry(OrderRetryPolicy::ConnectFailures);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host the API paths are appended to
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Which order submissions may be repeated
    pub order_retry: OrderRetryPolicy,
    /// Whether to renew the access token before it expires
    pub auto_refresh_session: bool,
    /// Buffer time (in seconds) before expiry to refresh
    pub refresh_buffer_secs: i64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("tdameritrade-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            retry: RetryConfig::default(),
            order_retry: OrderRetryPolicy::default(),
            auto_refresh_session: true,
            refresh_buffer_secs: 60,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another host, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Set the order retry policy.
    pub fn with_order_retry(mut self, policy: OrderRetryPolicy) -> Self {
        self.order_retry = policy;
        self
    }

    /// Enable or disable automatic token renewal.
    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh_session = enabled;
        self
    }

    /// Set the buffer time before expiry to refresh.
    pub fn with_refresh_buffer(mut self, secs: i64) -> Self {
        self.refresh_buffer_secs = secs;
        self
    }
}

/// When an order submission may be sent again.
///
/// Repeating an order the broker may already have accepted risks a
/// duplicate fill, so the policy only ever covers failures where the
/// request provably never left this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderRetryPolicy {
    /// Submit exactly once
    #[default]
    Never,
    /// Retry when the connection could not be established
    ConnectFailures,
}
