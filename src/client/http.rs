//! HTTP client implementation for the TD Ameritrade API.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::sync::Arc;
use url::Url;

use crate::api::{MarketDataService, OrdersService};
use crate::auth::{Credentials, TokenManager};
use crate::Result;

use super::config::ClientConfig;
use super::response::ApiResponse;

/// The main client for interacting with the TD Ameritrade API.
///
/// Owns the connection pool, configuration, credentials and the access
/// token, and hands out the API services. Cloning is cheap and shares all
/// of it.
///
/// # Example
///
/// ```no_run
/// use tdameritrade_rs::{ClientConfig, Credentials, TdClient};
/// use tdameritrade_rs::models::OrderRequest;
/// use rust_decimal_macros::dec;
///
/// # async fn example() -> tdameritrade_rs::Result<()> {
/// let client = TdClient::connect(Credentials::from_env(), ClientConfig::default()).await?;
///
/// let history = client.market_data().get_market_data("AAPL").await;
///
/// let order = OrderRequest::builder("AAPL").price(dec!(150.00)).build()?;
/// let outcome = client.orders().place_trade(&order).await;
/// # Ok(())
/// # }
/// ```
pub struct TdClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) credentials: Credentials,
    pub(crate) tokens: TokenManager,
    pub(crate) config: ClientConfig,
}

impl TdClient {
    /// Create a client without contacting the API.
    ///
    /// The access token is fetched lazily on first use.
    ///
    /// # Errors
    ///
    /// Fails if `config.base_url` is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?
            .as_str()
            .trim_end_matches('/')
            .to_string();

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let tokens = TokenManager::new(
            http.clone(),
            &base_url,
            credentials.clone(),
            config.retry.clone(),
            config.auto_refresh_session,
            config.refresh_buffer_secs,
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                credentials,
                tokens,
                config,
            }),
        })
    }

    /// Create a client and fetch the initial access token.
    ///
    /// A failed token refresh is logged, not returned: the client is still
    /// usable and will try again when a token is first needed.
    pub async fn connect(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        for name in credentials.placeholder_fields() {
            tracing::warn!(variable = *name, "{} is not set, using a placeholder", name);
        }

        let client = Self::new(credentials, config)?;
        if client.auth().refresh_access_token().await.is_none() {
            tracing::warn!("Starting without an access token");
        }
        Ok(client)
    }

    /// Get the token manager.
    pub fn auth(&self) -> &TokenManager {
        &self.inner.tokens
    }

    /// Get the market data service.
    pub fn market_data(&self) -> MarketDataService {
        MarketDataService::new(self.inner.clone())
    }

    /// Get the orders service.
    pub fn orders(&self) -> OrdersService {
        OrdersService::new(self.inner.clone())
    }

    /// Get the credentials this client was built with.
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET through the retry executor.
    ///
    /// Statuses in `retry_statuses` count as failures; any other reply is
    /// returned unchanged.
    pub(crate) async fn get_with_retry<Q>(
        &self,
        operation: &str,
        path: &str,
        query: &Q,
    ) -> Option<ApiResponse>
    where
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        self.config
            .retry
            .run(operation, || self.get_once(&url, query))
            .await
    }

    async fn get_once<Q>(&self, url: &str, query: &Q) -> Result<ApiResponse>
    where
        Q: Serialize + ?Sized,
    {
        let response = self.http.get(url).query(query).send().await?;
        let response = ApiResponse::read(response).await?;

        if self.config.retry.should_retry_status(response.status) {
            return Err(response.into_error());
        }
        Ok(response)
    }

    /// POST a JSON body with a bearer token, once.
    pub(crate) async fn post_json<B>(
        &self,
        path: &str,
        body: &B,
        token: &SecretString,
    ) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(token.expose_secret())
            .json(body)
            .send()
            .await?;

        ApiResponse::read(response).await
    }
}

impl Clone for TdClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for TdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TdClient")
            .field("base_url", &self.inner.base_url)
            .field("config", &self.inner.config)
            .finish()
    }
}
