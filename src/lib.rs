//! # tdameritrade-rs
//!
//! An async Rust client for the TD Ameritrade REST API, built for small
//! scheduled trading jobs.
//!
//! ## Features
//!
//! - **Authentication**: OAuth refresh-token exchange with proactive renewal
//! - **Market Data**: Price history (candles) with automatic retries
//! - **Order Management**: Single-leg equity limit orders
//! - **Resilience**: Bounded retries with a non-blocking delay
//! - **Logging**: Append-only log file via `tracing`
//!
//! Service calls never return errors. Failures are logged and surface as
//! `None` or as an [`OrderOutcome`](api::OrderOutcome), so a polling loop
//! keeps running through outages.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tdameritrade_rs::{ClientConfig, Credentials, TdClient};
//! use tdameritrade_rs::models::{Instruction, OrderRequest};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> tdameritrade_rs::Result<()> {
//!     // Reads TD_AMERITRADE_API_KEY, TD_REFRESH_TOKEN, TD_ACCOUNT_ID, ...
//!     let client = TdClient::connect(Credentials::from_env(), ClientConfig::default()).await?;
//!
//!     // Raw price history, retried on failure
//!     if let Some(response) = client.market_data().get_market_data("AAPL").await {
//!         println!("status {}", response.status);
//!     }
//!
//!     // Place a limit order
//!     let order = OrderRequest::builder("AAPL")
//!         .instruction(Instruction::BuyToOpen)
//!         .quantity(1)
//!         .price(dec!(150.00))
//!         .build()?;
//!     let outcome = client.orders().place_trade(&order).await;
//!     println!("{:?}", outcome);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod logging;
pub mod models;
pub mod retry;

// Re-export primary types at crate root for convenience
pub use error::{Error, Result};
pub use models::{AccountId, Symbol};
pub use client::{ApiResponse, ClientConfig, OrderRetryPolicy, TdClient};
pub use retry::{call_with_retry, RetryConfig};
pub use auth::{Credentials, TokenManager};

/// Prelude module for convenient imports.
///
/// ```rust
/// use tdameritrade_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Primitives
        AccountId, Symbol,
        // Enums
        Instruction, PeriodType, FrequencyType,
        // Orders
        OrderRequest, OrderPayload,
        // Market data
        PriceHistoryQuery, PriceHistory, Candle,
    };
    pub use crate::api::OrderOutcome;
    pub use crate::client::{TdClient, ClientConfig, OrderRetryPolicy, ApiResponse};
    pub use crate::auth::Credentials;
    pub use crate::retry::RetryConfig;
}
