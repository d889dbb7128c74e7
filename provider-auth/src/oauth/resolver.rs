//! Email resolution for an authenticated session.

use log::*;
use serde::Deserialize;

use super::claims::extract_subject_claim;
use super::endpoints::EndpointSet;
use super::session::SessionState;
use crate::error::{identity_error, Error, IdentityErrorKind};
use crate::http::{auth_headers, request_json};

/// Profile returned by the provider's userinfo endpoint.
#[derive(Debug, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, alias = "Email")]
    pub email: Option<String>,
}

/// Resolve the email of the user behind `session`.
///
/// The subject claim embedded in a structured access token is used when present.
/// Otherwise a single authenticated `GET` is made against the profile endpoint.
/// The subject is treated as the email; for providers whose `sub` is not an email
/// address, use [`fetch_profile_email`] directly.
pub async fn resolve_email(
    client: &reqwest::Client,
    endpoints: &EndpointSet,
    session: &SessionState,
) -> Result<String, Error> {
    if !session.has_access_token() {
        return Err(missing_token());
    }

    match extract_subject_claim(session.access_token()) {
        Ok(subject) => {
            debug!("Resolved identity from embedded subject claim");
            return Ok(subject);
        }
        Err(e) => debug!("No usable subject claim ({}), querying profile endpoint", e),
    }

    fetch_profile_email(client, endpoints, session).await
}

/// Look up the session's email through the profile endpoint only.
pub async fn fetch_profile_email(
    client: &reqwest::Client,
    endpoints: &EndpointSet,
    session: &SessionState,
) -> Result<String, Error> {
    if !session.has_access_token() {
        return Err(missing_token());
    }

    let headers = auth_headers(session.access_token())?;
    let profile: ProfileRecord = request_json(client, endpoints.profile_url(), headers).await?;

    match profile.email {
        Some(email) if !email.is_empty() => Ok(email),
        _ => Err(identity_error(IdentityErrorKind::NoEmail, "no email")),
    }
}

fn missing_token() -> Error {
    identity_error(IdentityErrorKind::MissingToken, "missing access token")
}
