//! Market data service for price history.

use std::sync::Arc;

use crate::client::{ApiResponse, ClientInner};
use crate::models::{PriceHistory, PriceHistoryParams, PriceHistoryQuery, Symbol};

/// Service for price-history requests.
///
/// Requests authenticate with the API key as a query parameter and go
/// through the retry executor: transport errors and retryable statuses
/// are retried, and after the last attempt the call yields `None`.
///
/// # Example
///
/// ```no_run
/// use tdameritrade_rs::models::{FrequencyType, PeriodType, PriceHistoryQuery};
///
/// # async fn example(client: tdameritrade_rs::TdClient) {
/// // One hour of one-minute candles
/// if let Some(response) = client.market_data().get_market_data("AAPL").await {
///     println!("{}: {}", response.status, response.body);
/// }
///
/// // Five days of fifteen-minute candles, decoded
/// let query = PriceHistoryQuery::new()
///     .period(PeriodType::Day, 5)
///     .frequency(FrequencyType::Minute, 15);
/// if let Some(history) = client.market_data().candles("AAPL", query).await {
///     println!("{} candles", history.candles.len());
/// }
/// # }
/// ```
pub struct MarketDataService {
    inner: Arc<ClientInner>,
}

/// Path of the price-history endpoint for `symbol`.
pub fn price_history_path(symbol: &Symbol) -> String {
    format!("/v1/marketdata/{}/pricehistory", symbol.path_segment())
}

impl MarketDataService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Fetch price history with the default window (one hour of
    /// one-minute candles).
    pub async fn get_market_data(&self, symbol: impl Into<Symbol>) -> Option<ApiResponse> {
        self.price_history(symbol, PriceHistoryQuery::default()).await
    }

    /// Fetch price history and return the raw reply.
    ///
    /// The body is not inspected.
    pub async fn price_history(
        &self,
        symbol: impl Into<Symbol>,
        query: PriceHistoryQuery,
    ) -> Option<ApiResponse> {
        let symbol = symbol.into();
        let params = PriceHistoryParams::new(self.inner.credentials.api_key(), query);

        tracing::debug!(%symbol, ?query, "Fetching price history");
        self.inner
            .get_with_retry("price history", &price_history_path(&symbol), &params)
            .await
    }

    /// Fetch and decode price history.
    ///
    /// Yields `None` (and logs why) when the request fails, the reply is
    /// not 200, or the body does not decode.
    pub async fn candles(
        &self,
        symbol: impl Into<Symbol>,
        query: PriceHistoryQuery,
    ) -> Option<PriceHistory> {
        let symbol = symbol.into();
        let response = self.price_history(symbol.clone(), query).await?;

        if response.status != 200 {
            tracing::error!(
                %symbol,
                status = response.status,
                "Error fetching price history: {}",
                response.body
            );
            return None;
        }

        match response.json::<PriceHistory>() {
            Ok(history) => Some(history),
            Err(e) => {
                tracing::error!(%symbol, "Malformed price history: {}", e);
                None
            }
        }
    }
}
