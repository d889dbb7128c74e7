//! Generic OpenID Connect provider configured with explicit endpoints.

use async_trait::async_trait;

use super::{explicit_endpoints, provider_data, ProviderSettings};
use crate::error::Error;
use crate::oauth::resolver::fetch_profile_email;
use crate::oauth::{ProviderData, ProviderKind, SessionState};

/// Scope requested when none is configured.
pub const DEFAULT_SCOPE: &str = "openid email";

/// Generic OIDC provider.
///
/// Resolves emails through the userinfo endpoint only, since a generic issuer's
/// `sub` claim is an opaque identifier rather than an address. Validation uses the
/// trait default.
pub struct Provider {
    data: ProviderData,
}

impl Provider {
    /// Create a new provider from explicit login, redeem and profile URLs.
    pub fn new(settings: &ProviderSettings) -> Result<Self, Error> {
        let endpoints = explicit_endpoints(settings)?;
        let data = provider_data("OpenID Connect", endpoints, settings, DEFAULT_SCOPE)?;
        Ok(Self { data })
    }
}

#[async_trait]
impl crate::oauth::Provider for Provider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Oidc
    }

    fn data(&self) -> &ProviderData {
        &self.data
    }

    async fn email_address(&self, session: &SessionState) -> Result<String, Error> {
        fetch_profile_email(&self.data.http_client, &self.data.endpoints, session).await
    }
}
