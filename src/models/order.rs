//! Order models for placing trades.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::*;
use super::primitives::Symbol;

/// A single-leg equity order to be submitted.
///
/// Use [`OrderRequestBuilder`] to construct one with validation.
///
/// # Example
///
/// ```
/// use tdameritrade_rs::models::{Instruction, OrderRequest};
/// use rust_decimal_macros::dec;
///
/// let order = OrderRequest::builder("AAPL")
///     .instruction(Instruction::BuyToOpen)
///     .quantity(10)
///     .price(dec!(150.00))
///     .build()
///     .unwrap();
/// assert_eq!(order.quantity, 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    /// Trading symbol
    pub symbol: Symbol,
    /// Leg instruction
    pub instruction: Instruction,
    /// Number of shares, always positive
    pub quantity: u32,
    /// Limit price; `None` leaves the price unconstrained
    pub price: Option<Decimal>,
}

impl OrderRequest {
    /// Start building an order for `symbol`.
    pub fn builder(symbol: impl Into<Symbol>) -> OrderRequestBuilder {
        OrderRequestBuilder::new(symbol)
    }

    /// Wire payload for this order.
    pub fn payload(&self) -> OrderPayload {
        OrderPayload::from(self)
    }
}

/// Builder for [`OrderRequest`].
///
/// Defaults to one share, `BUY_TO_OPEN`, no price.
#[derive(Debug, Clone)]
pub struct OrderRequestBuilder {
    symbol: Symbol,
    instruction: Instruction,
    quantity: u32,
    price: Option<Decimal>,
}

impl OrderRequestBuilder {
    /// Create a new builder.
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            instruction: Instruction::default(),
            quantity: 1,
            price: None,
        }
    }

    /// Set the leg instruction.
    pub fn instruction(mut self, instruction: Instruction) -> Self {
        self.instruction = instruction;
        self
    }

    /// Set the number of shares.
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the limit price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set or clear the limit price.
    pub fn maybe_price(mut self, price: Option<Decimal>) -> Self {
        self.price = price;
        self
    }

    /// Build the order, validating all fields.
    pub fn build(self) -> crate::Result<OrderRequest> {
        if self.symbol.as_str().trim().is_empty() {
            return Err(crate::Error::InvalidInput(
                "Symbol must not be empty".to_string(),
            ));
        }

        if self.quantity == 0 {
            return Err(crate::Error::InvalidInput(
                "Quantity must be positive".to_string(),
            ));
        }

        // A zero price would be indistinguishable from "no price" on the wire
        if let Some(price) = self.price {
            if price <= Decimal::ZERO {
                return Err(crate::Error::InvalidInput(format!(
                    "Price must be positive, got {}",
                    price
                )));
            }
        }

        Ok(OrderRequest {
            symbol: self.symbol,
            instruction: self.instruction,
            quantity: self.quantity,
            price: self.price,
        })
    }
}

/// JSON body of an order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    /// Always `LIMIT`
    pub order_type: OrderType,
    /// Always `NORMAL`
    pub session: Session,
    /// Always `DAY`
    pub duration: OrderDuration,
    /// Always `SINGLE`
    pub order_strategy_type: OrderStrategyType,
    /// Exactly one leg
    pub order_leg_collection: Vec<OrderLeg>,
    /// Limit price, omitted entirely when unset
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
}

impl From<&OrderRequest> for OrderPayload {
    fn from(request: &OrderRequest) -> Self {
        Self {
            order_type: OrderType::Limit,
            session: Session::Normal,
            duration: OrderDuration::Day,
            order_strategy_type: OrderStrategyType::Single,
            order_leg_collection: vec![OrderLeg {
                instruction: request.instruction,
                quantity: request.quantity,
                instrument: Instrument::equity(request.symbol.clone()),
            }],
            price: request.price,
        }
    }
}

/// One leg of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLeg {
    /// Buy/sell instruction
    pub instruction: Instruction,
    /// Number of shares
    pub quantity: u32,
    /// Traded instrument
    pub instrument: Instrument,
}

/// Instrument referenced by an order leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    /// Trading symbol
    pub symbol: Symbol,
    /// Asset type
    pub asset_type: AssetType,
}

impl Instrument {
    /// An equity instrument.
    pub fn equity(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            asset_type: AssetType::Equity,
        }
    }
}
