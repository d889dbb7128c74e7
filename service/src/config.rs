use chrono::{DateTime, Utc};
use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use provider_auth::oauth::providers::ProviderSettings;
use provider_auth::oauth::{ProviderKind, DEFAULT_APPROVAL_PROMPT};
use secrecy::SecretString;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Callback URL used when `REDIRECT_URL` is not set.
pub const DEFAULT_REDIRECT_URL: &str = "http://localhost:4180/oauth2/callback";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The identity provider to authenticate users against.
    #[arg(
        short,
        long,
        env,
        default_value_t = ProviderKind::Auth0,
        value_parser = clap::builder::PossibleValuesParser::new(["auth0", "oidc", "AUTH0", "OIDC"])
            .map(|s| s.parse::<ProviderKind>().unwrap()),
        )]
    pub provider: ProviderKind,

    /// The Auth0 tenant domain (e.g. example.eu.auth0.com). Required for the auth0 provider.
    #[arg(long, env)]
    auth0_domain: Option<String>,

    /// Authorization endpoint. Required for the oidc provider.
    #[arg(long, env)]
    login_url: Option<String>,

    /// Token redemption endpoint. Required for the oidc provider.
    #[arg(long, env)]
    redeem_url: Option<String>,

    /// Profile (userinfo) endpoint. Required for the oidc provider.
    #[arg(long, env)]
    profile_url: Option<String>,

    /// Access-token validation endpoint. Defaults to the profile endpoint.
    #[arg(long, env)]
    validate_url: Option<String>,

    /// The OAuth client ID registered with the provider.
    #[arg(long, env)]
    client_id: Option<String>,

    /// OAuth scope to request. Defaults to the provider's own scope.
    #[arg(long, env)]
    scope: Option<String>,

    /// Value sent as the `approval_prompt` login parameter.
    #[arg(long, env, default_value = DEFAULT_APPROVAL_PROMPT)]
    approval_prompt: String,

    /// The absolute callback URL the provider redirects back to after login.
    #[arg(long, env, default_value = DEFAULT_REDIRECT_URL)]
    redirect_url: String,

    /// Timeout in seconds for each request made to the provider
    #[arg(long, env, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub http_timeout_secs: u64,

    /// An access token to resolve and validate once the provider is configured.
    #[arg(long, env, hide_env_values = true, value_parser = parse_secret)]
    access_token: Option<SecretString>,

    /// RFC 3339 expiry of the access token. An expired token is reported without
    /// contacting the provider.
    #[arg(long, env, requires = "access_token", value_parser = parse_rfc3339)]
    access_token_expires_on: Option<DateTime<Utc>>,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn auth0_domain(&self) -> Option<String> {
        self.auth0_domain.clone()
    }

    pub fn client_id(&self) -> Option<String> {
        self.client_id.clone()
    }

    pub fn scope(&self) -> Option<String> {
        self.scope.clone()
    }

    pub fn approval_prompt(&self) -> &str {
        &self.approval_prompt
    }

    /// Returns the callback URL handed to the provider on login.
    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    pub fn access_token(&self) -> Option<SecretString> {
        self.access_token.clone()
    }

    pub fn access_token_expires_on(&self) -> Option<DateTime<Utc>> {
        self.access_token_expires_on
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Collects the provider-related options into the settings the provider is built from.
    pub fn provider_settings(&self) -> ProviderSettings {
        let mut settings =
            ProviderSettings::new(self.provider, &self.client_id().unwrap_or_default());
        settings.domain = self.auth0_domain();
        settings.login_url = self.login_url.clone();
        settings.redeem_url = self.redeem_url.clone();
        settings.profile_url = self.profile_url.clone();
        settings.validate_url = self.validate_url.clone();
        settings.scope = self.scope();
        settings.approval_prompt = Some(self.approval_prompt.clone());
        settings.http_timeout = self.http_timeout();
        settings
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}

fn parse_secret(value: &str) -> Result<SecretString, Infallible> {
    Ok(SecretString::from(value.to_string()))
}

fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}
