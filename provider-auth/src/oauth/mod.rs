//! OAuth 2.0 / OIDC identity-provider adapters.
//!
//! Builds login redirects, resolves the user behind an access token, and re-checks
//! that a session's token is still accepted by the provider.

mod claims;
mod endpoints;
mod login_url;
mod provider;
mod resolver;
mod session;
mod state;
mod validator;

pub mod providers;

pub use claims::{extract_subject_claim, ClaimError};
pub use endpoints::{EndpointSet, ProviderIdentity, DEFAULT_APPROVAL_PROMPT};
pub use login_url::build_login_url;
pub use provider::{Provider, ProviderData, ProviderKind, ProviderKindParseError};
pub use resolver::{fetch_profile_email, resolve_email, ProfileRecord};
pub use session::SessionState;
pub use state::generate_state;
pub use validator::{validate_session, validate_token};
