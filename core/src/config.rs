//! Client configuration.
//!
//! Credentials are passed in explicitly; the library keeps no process-wide
//! key. [`ClientConfig::from_env`] reads:
//!
//! - `IGDB_API_KEY` (required): sent as the `user-key` header
//! - `IGDB_ACCESS_TOKEN` (optional): bearer token for private resources
//! - `IGDB_API_URL` (optional): base URL, defaults to [`DEFAULT_BASE_URL`]

use std::env;

use crate::error::{ApiError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api-endpoint.igdb.com";

pub const API_KEY_ENV: &str = "IGDB_API_KEY";
pub const ACCESS_TOKEN_ENV: &str = "IGDB_ACCESS_TOKEN";
pub const API_URL_ENV: &str = "IGDB_API_URL";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    access_token: Option<String>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

// Keep secrets out of logs and panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    credentials: Credentials,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials,
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_key = non_blank_var(API_KEY_ENV)
            .ok_or_else(|| ApiError::MissingCredentials(format!("{API_KEY_ENV} is not set")))?;

        let mut credentials = Credentials::new(api_key);
        if let Some(token) = non_blank_var(ACCESS_TOKEN_ENV) {
            credentials = credentials.with_access_token(token);
        }

        let mut config = Self::new(credentials);
        if let Ok(url) = env::var(API_URL_ENV) {
            config = config.with_base_url(&url);
        }
        Ok(config)
    }

    /// Overrides the base URL. A trailing slash is stripped.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Reads `name`, treating an unset or whitespace-only value as absent.
fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_endpoint() {
        let config = ClientConfig::new(Credentials::new("key"));
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.credentials().api_key(), "key");
        assert_eq!(config.credentials().access_token(), None);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config =
            ClientConfig::new(Credentials::new("key")).with_base_url("http://localhost:3000/");
        assert_eq!(config.base_url(), "http://localhost:3000");
    }

    #[test]
    fn blank_access_token_is_ignored() {
        // The only test in this crate that touches the process environment.
        env::set_var(API_KEY_ENV, "env-key");
        env::set_var(ACCESS_TOKEN_ENV, "  ");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.credentials().api_key(), "env-key");
        assert_eq!(config.credentials().access_token(), None);

        env::set_var(ACCESS_TOKEN_ENV, "token");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.credentials().access_token(), Some("token"));

        env::remove_var(ACCESS_TOKEN_ENV);
        env::remove_var(API_KEY_ENV);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let creds = Credentials::new("secret-key").with_access_token("secret-token");
        let out = format!("{creds:?}");
        assert!(!out.contains("secret-key"));
        assert!(!out.contains("secret-token"));
    }
}
