//! Error types for the TD Ameritrade API client.
//!
//! Constructors and builders return [`Result`]. The service operations
//! (token refresh, price history, order placement) log their failures and
//! hand back `Option` / [`OrderOutcome`](crate::api::OrderOutcome) values
//! instead, so a scheduling loop is never torn down by a failed call.

use thiserror::Error;

/// A specialized `Result` type for TD Ameritrade operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response was read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-success response
    #[error("API error: status={status}, body={body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Token exchange was rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No usable access token is available
    #[error("Session expired; refresh required")]
    SessionExpired,

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Log file could not be opened
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Every attempt of a retried operation failed
    #[error("{0}: all retries failed")]
    RetriesExhausted(String),
}

impl Error {
    /// Returns `true` if this error is potentially transient and the
    /// operation could be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) => true,
            Error::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::Authentication(_) | Error::SessionExpired => true,
            Error::Api { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Returns `true` if the request never reached the server.
    ///
    /// Only connection failures qualify. A timeout may fire after the
    /// server already accepted the request, so it does not.
    pub fn is_connect_failure(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_connect() && !e.is_timeout())
    }

    /// Returns `true` if this error indicates a client-side issue.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => (400..500).contains(status),
            Error::InvalidInput(_) | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
    }
}
