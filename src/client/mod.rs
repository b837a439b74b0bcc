//! HTTP client and service layer for the TD Ameritrade API.
//!
//! [`TdClient`] is the entry point. It replaces process-wide credentials
//! and token globals with one explicit object that every call goes
//! through.
//!
//! # Example
//!
//! ```no_run
//! use tdameritrade_rs::{ClientConfig, Credentials, TdClient};
//!
//! # async fn example() -> tdameritrade_rs::Result<()> {
//! let client = TdClient::connect(Credentials::from_env(), ClientConfig::default()).await?;
//! let candles = client.market_data().candles("AAPL", Default::default()).await;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
mod response;

pub use config::{ClientConfig, OrderRetryPolicy, DEFAULT_BASE_URL};
pub use http::TdClient;
pub use response::ApiResponse;
pub(crate) use http::ClientInner;
