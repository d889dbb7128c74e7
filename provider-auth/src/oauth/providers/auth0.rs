//! Auth0 identity provider.

use async_trait::async_trait;

use super::{provider_data, ProviderSettings};
use crate::error::Error;
use crate::oauth::endpoints::EndpointSet;
use crate::oauth::resolver::resolve_email;
use crate::oauth::validator::validate_session;
use crate::oauth::{ProviderData, ProviderKind, SessionState};

/// Scope requested when none is configured.
pub const DEFAULT_SCOPE: &str = "openid profile email";

/// Auth0 provider.
///
/// Endpoints are derived from the tenant domain. Access tokens issued to
/// non-interactive clients embed the user in their `sub` claim, which spares the
/// userinfo round trip.
pub struct Provider {
    data: ProviderData,
}

impl Provider {
    /// Create a new Auth0 provider. Fails when no domain is configured.
    pub fn new(settings: &ProviderSettings) -> Result<Self, Error> {
        let endpoints = EndpointSet::from_domain(settings.domain.as_deref().unwrap_or_default())?;
        let data = provider_data("Auth0", endpoints, settings, DEFAULT_SCOPE)?;
        Ok(Self { data })
    }
}

#[async_trait]
impl crate::oauth::Provider for Provider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Auth0
    }

    fn data(&self) -> &ProviderData {
        &self.data
    }

    async fn email_address(&self, session: &SessionState) -> Result<String, Error> {
        resolve_email(&self.data.http_client, &self.data.endpoints, session).await
    }

    async fn validate_session(&self, session: &SessionState) -> bool {
        validate_session(&self.data.http_client, &self.data.endpoints, session).await
    }
}
