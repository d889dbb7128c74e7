//! Session access-token validation.
//!
//! Validation is a gate, not a diagnostic: every failure collapses to `false`.

use log::*;
use reqwest::header::HeaderMap;
use url::Url;

use super::endpoints::EndpointSet;
use super::session::SessionState;
use crate::http::auth_headers;

/// Check an access token against a provider's validate endpoint.
///
/// With `headers`, they are sent as-is. Without, the token travels as an
/// `access_token` query parameter. Returns `true` only for a 2xx response.
pub async fn validate_token(
    client: &reqwest::Client,
    validate_url: &Url,
    access_token: &str,
    headers: Option<HeaderMap>,
) -> bool {
    if access_token.is_empty() {
        return false;
    }

    let mut endpoint = validate_url.clone();
    let request = match headers {
        Some(headers) => client.get(endpoint.clone()).headers(headers),
        None => {
            endpoint
                .query_pairs_mut()
                .append_pair("access_token", access_token);
            client.get(endpoint.clone())
        }
    };

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("token validation request to {} failed: {:?}", validate_url, e);
            return false;
        }
    };

    let status = response.status();
    if status.is_success() {
        debug!("{} GET {}", status.as_u16(), validate_url);
        return true;
    }

    let body = response.text().await.unwrap_or_default();
    info!(
        "token validation request failed: status {} - {}",
        status.as_u16(),
        body
    );
    false
}

/// Validate a session with `Accept: application/json` and a bearer `Authorization`
/// header against the validate endpoint.
///
/// Sessions without a token or past their expiry are rejected without a request.
pub async fn validate_session(
    client: &reqwest::Client,
    endpoints: &EndpointSet,
    session: &SessionState,
) -> bool {
    if !session.has_access_token() {
        return false;
    }
    if session.is_expired() {
        debug!("session expired, skipping validation request");
        return false;
    }

    match auth_headers(session.access_token()) {
        Ok(headers) => {
            validate_token(
                client,
                endpoints.validate_url(),
                session.access_token(),
                Some(headers),
            )
            .await
        }
        Err(e) => {
            warn!("cannot build validation headers: {}", e);
            false
        }
    }
}
