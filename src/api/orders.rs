//! Orders service for order placement.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::client::{ApiResponse, ClientInner, OrderRetryPolicy};
use crate::models::{AccountId, Instruction, OrderPayload, OrderRequest, Symbol};
use crate::{Error, Result};

/// Service for order operations.
///
/// Order placement never returns an error. Every failure ends in a log
/// line and an [`OrderOutcome`] describing what happened.
///
/// # Example
///
/// ```no_run
/// use tdameritrade_rs::models::{Instruction, OrderRequest};
/// use rust_decimal_macros::dec;
///
/// # async fn example(client: tdameritrade_rs::TdClient) -> tdameritrade_rs::Result<()> {
/// let order = OrderRequest::builder("AAPL")
///     .instruction(Instruction::BuyToOpen)
///     .quantity(1)
///     .price(dec!(150.00))
///     .build()?;
///
/// let outcome = client.orders().place_trade(&order).await;
/// if outcome.is_placed() {
///     println!("order accepted");
/// }
/// # Ok(())
/// # }
/// ```
pub struct OrdersService {
    inner: Arc<ClientInner>,
}

/// Result of an order submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// The broker answered 201
    Placed {
        /// Order id from the `Location` header, when present
        order_id: Option<String>,
    },
    /// The broker answered with any other status
    Rejected {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },
    /// No reply was obtained
    Failed {
        /// Description of the failure
        reason: String,
    },
}

impl OrderOutcome {
    /// Returns `true` if the broker accepted the order.
    pub fn is_placed(&self) -> bool {
        matches!(self, OrderOutcome::Placed { .. })
    }
}

/// Path of the order endpoint for `account_id`.
pub fn orders_path(account_id: &AccountId) -> String {
    format!(
        "/v1/accounts/{}/orders",
        urlencoding::encode(account_id.as_str())
    )
}

impl OrdersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Place a single-leg limit order.
    ///
    /// A 401 reply triggers one token refresh and one resubmission, since
    /// the broker did not act on the first request. Other failures are
    /// governed by [`OrderRetryPolicy`].
    pub async fn place_trade(&self, order: &OrderRequest) -> OrderOutcome {
        let payload = order.payload();
        let path = orders_path(self.inner.credentials.account_id());

        let mut result = self.submit(&path, &payload).await;
        if matches!(&result, Ok(response) if response.status == 401) {
            tracing::warn!("Order answered 401, refreshing access token and resubmitting");
            if self.inner.tokens.force_refresh().await.is_some() {
                result = self.submit(&path, &payload).await;
            }
        }

        match result {
            Ok(response) if response.status == 201 => {
                let price = order
                    .price
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "market".to_string());
                tracing::info!(
                    instruction = %order.instruction,
                    quantity = order.quantity,
                    symbol = %order.symbol,
                    "Trade placed: {} {} shares of {} at {}",
                    order.instruction,
                    order.quantity,
                    order.symbol,
                    price
                );
                OrderOutcome::Placed {
                    order_id: response.resource_id().map(String::from),
                }
            }
            Ok(response) => {
                tracing::error!(
                    status = response.status,
                    symbol = %order.symbol,
                    "Error placing trade: {} {}",
                    response.status,
                    response.body
                );
                OrderOutcome::Rejected {
                    status: response.status,
                    body: response.body,
                }
            }
            Err(e) => {
                tracing::error!(symbol = %order.symbol, "Error placing trade: {}", e);
                OrderOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Build an order from its parts and place it.
    ///
    /// Invalid parts (zero quantity, non-positive price, empty symbol) are
    /// logged and reported as [`OrderOutcome::Failed`] without contacting
    /// the API.
    pub async fn place(
        &self,
        symbol: impl Into<Symbol>,
        instruction: Instruction,
        quantity: u32,
        price: Option<Decimal>,
    ) -> OrderOutcome {
        let built = OrderRequest::builder(symbol)
            .instruction(instruction)
            .quantity(quantity)
            .maybe_price(price)
            .build();

        match built {
            Ok(order) => self.place_trade(&order).await,
            Err(e) => {
                tracing::error!("Error placing trade: {}", e);
                OrderOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn submit(&self, path: &str, payload: &OrderPayload) -> Result<ApiResponse> {
        match self.inner.config.order_retry {
            OrderRetryPolicy::Never => self.submit_once(path, payload).await,
            OrderRetryPolicy::ConnectFailures => self
                .inner
                .config
                .retry
                .try_run_if(
                    "place order",
                    || self.submit_once(path, payload),
                    Error::is_connect_failure,
                )
                .await
                .map_err(|last| {
                    last.unwrap_or_else(|| Error::RetriesExhausted("place order".to_string()))
                }),
        }
    }

    async fn submit_once(&self, path: &str, payload: &OrderPayload) -> Result<ApiResponse> {
        let token = self.inner.tokens.access_token().await?;
        self.inner.post_json(path, payload, &token).await
    }
}
