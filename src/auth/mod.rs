//! Credentials and OAuth token management.
//!
//! The brokerage issues long-lived refresh tokens and short-lived access
//! tokens (about 30 minutes). [`Credentials`] holds the former;
//! [`TokenManager`] trades it for the latter and keeps it current.
//!
//! ```no_run
//! use tdameritrade_rs::{ClientConfig, Credentials, TdClient};
//!
//! # async fn example() -> tdameritrade_rs::Result<()> {
//! let client = TdClient::connect(Credentials::from_env(), ClientConfig::default()).await?;
//! if client.auth().current_token().await.is_none() {
//!     eprintln!("initial token refresh failed, see the log file");
//! }
//! # Ok(())
//! # }
//! ```

mod credentials;
mod token;

pub use credentials::{
    Credentials, ACCOUNT_ID_VAR, API_KEY_VAR, CLIENT_ID_SUFFIX, REDIRECT_URI_VAR,
    REFRESH_TOKEN_VAR, SECRET_KEY_VAR,
};
pub use token::{TokenManager, DEFAULT_TOKEN_TTL_SECS, TOKEN_PATH};
