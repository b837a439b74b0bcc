//! Raw HTTP replies.

use reqwest::header::LOCATION;
use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Status, `Location` header and body of an HTTP reply.
///
/// Returned as-is by the market data service; callers decide what the
/// body means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// `Location` header, set by the API on created resources
    pub location: Option<String>,
    /// Raw response body
    pub body: String,
}

impl ApiResponse {
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.text().await?;

        Ok(Self {
            status,
            location,
            body,
        })
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Last path segment of the `Location` header.
    pub fn resource_id(&self) -> Option<&str> {
        self.location
            .as_deref()
            .and_then(|loc| loc.trim_end_matches('/').rsplit('/').next())
            .filter(|id| !id.is_empty())
    }

    /// Turn the reply into an [`Error::Api`].
    pub fn into_error(self) -> Error {
        Error::Api {
            status: self.status,
            body: self.body,
        }
    }
}
