//! API credentials loaded once at startup.

use secrecy::{ExposeSecret, SecretString};

use crate::AccountId;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "TD_AMERITRADE_API_KEY";
/// Environment variable holding the redirect URI.
pub const REDIRECT_URI_VAR: &str = "TD_REDIRECT_URI";
/// Environment variable holding the refresh token.
pub const REFRESH_TOKEN_VAR: &str = "TD_REFRESH_TOKEN";
/// Environment variable holding the account id.
pub const ACCOUNT_ID_VAR: &str = "TD_ACCOUNT_ID";
/// Environment variable holding the secret key.
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";

/// Suffix appended to the API key to form the OAuth client id.
pub const CLIENT_ID_SUFFIX: &str = "@AMER.OAUTHAP";

/// API key, tokens and account id used by every call.
///
/// Secret values are kept in [`SecretString`] and never appear in `Debug`
/// output.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    redirect_uri: String,
    refresh_token: SecretString,
    account_id: AccountId,
    secret_key: SecretString,
    placeholders: Vec<&'static str>,
}

impl Credentials {
    /// Create credentials from explicit values.
    ///
    /// Redirect URI and secret key start empty; set them with the
    /// `with_*` methods if needed.
    pub fn new(
        api_key: impl Into<String>,
        refresh_token: impl Into<String>,
        account_id: impl Into<AccountId>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            redirect_uri: String::new(),
            refresh_token: SecretString::from(refresh_token.into()),
            account_id: account_id.into(),
            secret_key: SecretString::from(String::new()),
            placeholders: Vec::new(),
        }
    }

    /// Load credentials from the process environment.
    ///
    /// Unset or empty variables fall back to placeholder values, which are
    /// reported by [`placeholder_fields`](Self::placeholder_fields).
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut placeholders = Vec::new();
        let mut read = |name: &'static str, fallback: &str| {
            match lookup(name).filter(|v| !v.trim().is_empty()) {
                Some(value) => value,
                None => {
                    placeholders.push(name);
                    fallback.to_string()
                }
            }
        };

        let api_key = read(API_KEY_VAR, "YOUR_TD_AMERITRADE_API_KEY");
        let redirect_uri = read(REDIRECT_URI_VAR, "YOUR_REDIRECT_URI");
        let refresh_token = read(REFRESH_TOKEN_VAR, "YOUR_REFRESH_TOKEN");
        let account_id = read(ACCOUNT_ID_VAR, "YOUR_ACCOUNT_ID");
        let secret_key = read(SECRET_KEY_VAR, "YOUR_SECRET_KEY");

        Self {
            api_key,
            redirect_uri,
            refresh_token: SecretString::from(refresh_token),
            account_id: AccountId::new(account_id),
            secret_key: SecretString::from(secret_key),
            placeholders,
        }
    }

    /// Set the redirect URI.
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }

    /// Set the secret key.
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = SecretString::from(secret_key.into());
        self
    }

    /// The API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// OAuth client id: the API key plus [`CLIENT_ID_SUFFIX`].
    pub fn client_id(&self) -> String {
        format!("{}{}", self.api_key, CLIENT_ID_SUFFIX)
    }

    /// The redirect URI.
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// The refresh token.
    pub fn refresh_token(&self) -> &SecretString {
        &self.refresh_token
    }

    /// The brokerage account id.
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// The secret key.
    pub fn secret_key(&self) -> &SecretString {
        &self.secret_key
    }

    /// Names of the environment variables that fell back to placeholders.
    pub fn placeholder_fields(&self) -> &[&'static str] {
        &self.placeholders
    }

    /// Returns `true` if every value came from the environment.
    pub fn is_complete(&self) -> bool {
        self.placeholders.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("redirect_uri", &self.redirect_uri)
            .field("refresh_token", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

impl PartialEq for Credentials {
    fn eq(&self, other: &Self) -> bool {
        self.api_key == other.api_key
            && self.redirect_uri == other.redirect_uri
            && self.account_id == other.account_id
            && self.refresh_token.expose_secret() == other.refresh_token.expose_secret()
            && self.secret_key.expose_secret() == other.secret_key.expose_secret()
    }
}
