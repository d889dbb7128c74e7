//! Provider endpoint set and client identity.

use url::{Host, Url};

use crate::error::{config_error, ConfigErrorKind, Error};

/// Default value sent as `approval_prompt` when none is configured.
pub const DEFAULT_APPROVAL_PROMPT: &str = "force";

/// The URLs an identity provider exposes.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointSet {
    authorize_url: Url,
    token_url: Url,
    profile_url: Url,
    validate_url: Url,
}

impl EndpointSet {
    /// Create an endpoint set from explicit URLs.
    ///
    /// `validate_url` falls back to `profile_url` when `None` or empty. Every URL must
    /// be absolute and use `https`, except for loopback hosts which may use `http`.
    pub fn new(
        authorize_url: &str,
        token_url: &str,
        profile_url: &str,
        validate_url: Option<&str>,
    ) -> Result<Self, Error> {
        let authorize_url = parse_endpoint("login", authorize_url)?;
        let token_url = parse_endpoint("redeem", token_url)?;
        let profile_url = parse_endpoint("profile", profile_url)?;
        let validate_url = match validate_url.filter(|v| !v.trim().is_empty()) {
            Some(url) => parse_endpoint("validate", url)?,
            None => profile_url.clone(),
        };

        Ok(Self {
            authorize_url,
            token_url,
            profile_url,
            validate_url,
        })
    }

    /// Derive the endpoint layout of an Auth0 tenant from its domain.
    pub fn from_domain(domain: &str) -> Result<Self, Error> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(config_error(
                ConfigErrorKind::MissingDomain,
                "auth0 domain not set",
            ));
        }

        let profile_url = format!("https://{}/userinfo", domain);
        Self::new(
            &format!("https://{}/authorize", domain),
            &format!("https://{}/oauth/token", domain),
            &profile_url,
            None,
        )
    }

    pub fn authorize_url(&self) -> &Url {
        &self.authorize_url
    }

    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    pub fn profile_url(&self) -> &Url {
        &self.profile_url
    }

    pub fn validate_url(&self) -> &Url {
        &self.validate_url
    }
}

/// Client identity registered with the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderIdentity {
    client_id: String,
    scope: String,
    approval_prompt: String,
}

impl ProviderIdentity {
    /// Create a client identity. Empty `scope` or `approval_prompt` take the given
    /// provider default and [`DEFAULT_APPROVAL_PROMPT`] respectively.
    pub fn new(
        client_id: &str,
        scope: Option<&str>,
        default_scope: &str,
        approval_prompt: Option<&str>,
    ) -> Result<Self, Error> {
        if client_id.trim().is_empty() {
            return Err(config_error(
                ConfigErrorKind::MissingClientId,
                "client id not set",
            ));
        }

        let scope = scope
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(default_scope);
        let approval_prompt = approval_prompt
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_APPROVAL_PROMPT);

        Ok(Self {
            client_id: client_id.to_string(),
            scope: scope.to_string(),
            approval_prompt: approval_prompt.to_string(),
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn approval_prompt(&self) -> &str {
        &self.approval_prompt
    }
}

fn parse_endpoint(name: &str, value: &str) -> Result<Url, Error> {
    let value = value.trim();
    if value.is_empty() {
        return Err(config_error(
            ConfigErrorKind::MissingEndpoint,
            &format!("{} url not set", name),
        ));
    }

    let url = Url::parse(value).map_err(|e| {
        config_error(
            ConfigErrorKind::InvalidUrl,
            &format!("{} url {:?} is invalid: {}", name, value, e),
        )
    })?;

    match url.scheme() {
        "https" => Ok(url),
        "http" if is_loopback(&url) => Ok(url),
        _ => Err(config_error(
            ConfigErrorKind::InsecureUrl,
            &format!("{} url {:?} must use https", name, value),
        )),
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
