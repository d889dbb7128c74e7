//! Session state handed to providers by the proxy's session store.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

/// A user session as seen by a provider.
///
/// Owned by the session store; providers only read it.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Access token issued by the identity provider.
    pub access_token: SecretString,
    /// When the access token expires.
    pub expires_on: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Create a session holding only an access token.
    pub fn new(access_token: SecretString) -> Self {
        Self {
            access_token,
            expires_on: None,
        }
    }

    /// Set the expiry time.
    pub fn with_expires_on(mut self, expires_on: DateTime<Utc>) -> Self {
        self.expires_on = Some(expires_on);
        self
    }

    /// Expose the raw access token for building request headers.
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// True when the session carries no access token.
    pub fn has_access_token(&self) -> bool {
        !self.access_token().is_empty()
    }

    /// True when the expiry time has passed. Sessions without an expiry never expire here.
    pub fn is_expired(&self) -> bool {
        self.expires_on
            .map(|expires| expires <= Utc::now())
            .unwrap_or(false)
    }
}
