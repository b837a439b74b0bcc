//! Access-token lifecycle.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::retry::RetryConfig;
use crate::{Error, Result};

use super::Credentials;

/// Path of the OAuth token endpoint.
pub const TOKEN_PATH: &str = "/v1/oauth2/token";

/// Lifetime assumed when the token response carries no `expires_in`.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 1800;

/// Exchanges the refresh token for short-lived access tokens and keeps the
/// current one.
///
/// # Thread Safety
///
/// The token sits behind an async `RwLock`. Readers share the lock;
/// renewal takes it exclusively and re-checks expiry first, so concurrent
/// callers that find the token stale trigger a single exchange.
pub struct TokenManager {
    http: reqwest::Client,
    token_url: String,
    credentials: Credentials,
    retry: RetryConfig,
    auto_refresh: bool,
    refresh_buffer: Duration,
    state: RwLock<Option<TokenState>>,
}

struct TokenState {
    access_token: SecretString,
    expires_at: DateTime<Utc>,
}

impl TokenState {
    fn expires_within(&self, buffer: Duration) -> bool {
        Utc::now()
            .checked_add_signed(buffer)
            .map_or(true, |deadline| deadline >= self.expires_at)
    }
}

impl From<TokenResponse> for TokenState {
    fn from(response: TokenResponse) -> Self {
        let ttl = response.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        Self {
            access_token: SecretString::from(response.access_token),
            expires_at: expiry_after_secs(ttl),
        }
    }
}

/// Expiry instant for a lifetime of `ttl_secs` from now.
///
/// A non-positive lifetime is already expired. One too large to represent
/// falls back to [`DEFAULT_TOKEN_TTL_SECS`].
fn expiry_after_secs(ttl_secs: i64) -> DateTime<Utc> {
    let now = Utc::now();
    if ttl_secs <= 0 {
        return now;
    }
    Duration::try_seconds(ttl_secs)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or_else(|| {
            tracing::warn!(expires_in = ttl_secs, "Token lifetime out of range, using default");
            now + Duration::seconds(DEFAULT_TOKEN_TTL_SECS)
        })
}

impl TokenManager {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: &str,
        credentials: Credentials,
        retry: RetryConfig,
        auto_refresh: bool,
        refresh_buffer_secs: i64,
    ) -> Self {
        Self {
            http,
            token_url: format!("{}{}", base_url, TOKEN_PATH),
            credentials,
            retry,
            auto_refresh,
            refresh_buffer: Duration::try_seconds(refresh_buffer_secs).unwrap_or(Duration::MAX),
            state: RwLock::new(None),
        }
    }

    /// Exchange the refresh token for a new access token, once.
    ///
    /// On success the token is stored and returned. A non-200 reply is
    /// logged together with its body and yields `None`, as does a
    /// transport failure.
    pub async fn refresh_access_token(&self) -> Option<SecretString> {
        match self.exchange().await {
            Ok(response) => Some(self.store(response).await),
            Err(Error::Api { status, body }) => {
                tracing::error!(status, "Error refreshing access token: {}", body);
                None
            }
            Err(e) => {
                tracing::error!("Error refreshing access token: {}", e);
                None
            }
        }
    }

    /// Exchange the refresh token through the retry executor.
    ///
    /// Transport failures and 429/5xx replies are retried; any other
    /// rejection ends the attempt immediately.
    pub async fn refresh_with_retry(&self) -> Option<SecretString> {
        let response = self
            .retry
            .run_if("refresh access token", || self.exchange(), Error::is_retryable)
            .await?;
        Some(self.store(response).await)
    }

    /// Renew the token unconditionally.
    ///
    /// Used after a downstream call was answered with 401.
    pub async fn force_refresh(&self) -> Option<SecretString> {
        tracing::info!("Forcing access token refresh");
        self.refresh_with_retry().await
    }

    /// Get a usable access token.
    ///
    /// With auto-refresh enabled, a missing token or one expiring within
    /// the refresh buffer is renewed first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionExpired`] if no token is held and auto-refresh
    /// is disabled, or [`Error::Authentication`] if renewal failed.
    pub async fn access_token(&self) -> Result<SecretString> {
        {
            let state = self.state.read().await;
            match state.as_ref() {
                Some(s) if !self.auto_refresh || !s.expires_within(self.refresh_buffer) => {
                    return Ok(s.access_token.clone());
                }
                None if !self.auto_refresh => return Err(Error::SessionExpired),
                _ => {}
            }
        }

        let mut state = self.state.write().await;
        if let Some(s) = state.as_ref() {
            if !s.expires_within(self.refresh_buffer) {
                return Ok(s.access_token.clone());
            }
        }

        tracing::info!("Access token missing or about to expire, refreshing");
        let response = self
            .retry
            .run_if("refresh access token", || self.exchange(), Error::is_retryable)
            .await
            .ok_or_else(|| Error::Authentication("access token refresh failed".to_string()))?;
        let fresh = TokenState::from(response);
        let token = fresh.access_token.clone();
        *state = Some(fresh);
        Ok(token)
    }

    /// The stored token, without any renewal.
    pub async fn current_token(&self) -> Option<SecretString> {
        self.state
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// Expiry of the stored token.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.as_ref().map(|s| s.expires_at)
    }

    /// Returns `true` if a token is held and outside the refresh buffer.
    pub async fn is_valid(&self) -> bool {
        match self.state.read().await.as_ref() {
            Some(s) => !s.expires_within(self.refresh_buffer),
            None => false,
        }
    }

    /// Install a token obtained elsewhere.
    ///
    /// A `ttl` beyond the representable range never expires.
    pub async fn set_token(&self, access_token: impl Into<String>, ttl: Duration) {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).unwrap_or(if ttl > Duration::zero() {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        });
        *self.state.write().await = Some(TokenState {
            access_token: SecretString::from(access_token.into()),
            expires_at,
        });
    }

    async fn store(&self, response: TokenResponse) -> SecretString {
        let fresh = TokenState::from(response);
        let token = fresh.access_token.clone();
        tracing::info!(expires_at = %fresh.expires_at, "Access token refreshed");
        *self.state.write().await = Some(fresh);
        token
    }

    async fn exchange(&self) -> Result<TokenResponse> {
        let client_id = self.credentials.client_id();
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.credentials.refresh_token().expose_secret()),
            ("client_id", client_id.as_str()),
        ];

        let response = self.http.post(&self.token_url).form(&form).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        if status != 200 {
            return Err(Error::Api { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("token_url", &self.token_url)
            .field("access_token", &"[REDACTED]")
            .field("auto_refresh", &self.auto_refresh)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}
