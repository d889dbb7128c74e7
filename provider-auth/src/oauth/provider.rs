//! Identity provider trait and shared provider data.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use log::*;
use url::Url;

use super::endpoints::{EndpointSet, ProviderIdentity};
use super::login_url::build_login_url;
use super::session::SessionState;
use super::validator::validate_token;
use crate::error::Error;

/// Identity providers the proxy can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Auth0,
    Oidc,
}

impl ProviderKind {
    /// Get the provider identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Auth0 => "auth0",
            ProviderKind::Oidc => "oidc",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ProviderKindParseError;

impl FromStr for ProviderKind {
    type Err = ProviderKindParseError;
    fn from_str(kind: &str) -> Result<ProviderKind, Self::Err> {
        match kind.to_lowercase().as_str() {
            "auth0" => Ok(ProviderKind::Auth0),
            "oidc" => Ok(ProviderKind::Oidc),
            _ => Err(ProviderKindParseError),
        }
    }
}

/// Configuration every provider carries: endpoints, client identity and the HTTP
/// client used to reach the provider. Immutable once built.
#[derive(Debug, Clone)]
pub struct ProviderData {
    pub name: &'static str,
    pub endpoints: EndpointSet,
    pub identity: ProviderIdentity,
    pub http_client: reqwest::Client,
}

/// Trait for identity providers.
///
/// Implementations are selected at configuration time and shared read-only across
/// request handlers. Each method issues at most one request to the provider and
/// never retries.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider kind.
    fn provider(&self) -> ProviderKind;

    /// Get the provider's configuration.
    fn data(&self) -> &ProviderData;

    /// Human-readable provider name.
    fn name(&self) -> &'static str {
        self.data().name
    }

    /// Build the authorization URL the user is redirected to.
    ///
    /// # Arguments
    ///
    /// * `redirect_uri` - Absolute callback URL the provider redirects back to
    /// * `state` - Anti-forgery state token, opaque to the provider
    fn login_url(&self, redirect_uri: &str, state: &str) -> Url {
        let data = self.data();
        build_login_url(&data.endpoints, &data.identity, redirect_uri, state)
    }

    /// Resolve the email address of the user behind `session`.
    async fn email_address(&self, session: &SessionState) -> Result<String, Error>;

    /// Check whether the session's access token is still accepted by the provider.
    ///
    /// Defaults to sending the token as an `access_token` query parameter to the
    /// validate endpoint. Sessions past their expiry are rejected without a request.
    async fn validate_session(&self, session: &SessionState) -> bool {
        if session.is_expired() {
            debug!("session expired, skipping validation request");
            return false;
        }

        let data = self.data();
        validate_token(
            &data.http_client,
            data.endpoints.validate_url(),
            session.access_token(),
            None,
        )
        .await
    }
}
