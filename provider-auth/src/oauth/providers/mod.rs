//! Identity provider implementations and configuration-time selection.

pub mod auth0;
pub mod oidc;

use std::sync::Arc;
use std::time::Duration;

use log::*;

use super::endpoints::{EndpointSet, ProviderIdentity};
use super::provider::{Provider, ProviderData, ProviderKind};
use crate::error::{config_error, ConfigErrorKind, Error};
use crate::http::ClientBuilder;

/// Settings a provider is configured from at startup.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    /// Tenant domain; Auth0 derives its endpoints from it.
    pub domain: Option<String>,
    pub login_url: Option<String>,
    pub redeem_url: Option<String>,
    pub profile_url: Option<String>,
    pub validate_url: Option<String>,
    pub client_id: String,
    pub scope: Option<String>,
    pub approval_prompt: Option<String>,
    /// Deadline for each request made to the provider.
    pub http_timeout: Duration,
}

impl ProviderSettings {
    pub fn new(kind: ProviderKind, client_id: &str) -> Self {
        Self {
            kind,
            domain: None,
            login_url: None,
            redeem_url: None,
            profile_url: None,
            validate_url: None,
            client_id: client_id.to_string(),
            scope: None,
            approval_prompt: None,
            http_timeout: Duration::from_secs(10),
        }
    }
}

/// Build the configured provider.
///
/// All configuration problems are reported here, before any request is served.
pub fn from_config(settings: ProviderSettings) -> Result<Arc<dyn Provider>, Error> {
    let provider: Arc<dyn Provider> = match settings.kind {
        ProviderKind::Auth0 => Arc::new(auth0::Provider::new(&settings)?),
        ProviderKind::Oidc => Arc::new(oidc::Provider::new(&settings)?),
    };

    info!(
        "Configured {} provider (login: {})",
        provider.name(),
        provider.data().endpoints.authorize_url()
    );
    Ok(provider)
}

/// Endpoints from explicit per-endpoint URLs.
pub(crate) fn explicit_endpoints(settings: &ProviderSettings) -> Result<EndpointSet, Error> {
    let required = |value: &Option<String>, name: &str| -> Result<String, Error> {
        value.clone().ok_or_else(|| {
            config_error(
                ConfigErrorKind::MissingEndpoint,
                &format!("{} url not set", name),
            )
        })
    };

    EndpointSet::new(
        &required(&settings.login_url, "login")?,
        &required(&settings.redeem_url, "redeem")?,
        &required(&settings.profile_url, "profile")?,
        settings.validate_url.as_deref(),
    )
}

/// Assemble provider data once the endpoints are known.
pub(crate) fn provider_data(
    name: &'static str,
    endpoints: EndpointSet,
    settings: &ProviderSettings,
    default_scope: &str,
) -> Result<ProviderData, Error> {
    let identity = ProviderIdentity::new(
        &settings.client_id,
        settings.scope.as_deref(),
        default_scope,
        settings.approval_prompt.as_deref(),
    )?;

    let http_client = ClientBuilder::new()
        .with_timeout(settings.http_timeout)
        .build()?;

    Ok(ProviderData {
        name,
        endpoints,
        identity,
        http_client,
    })
}
