//! JSON-over-HTTP request helpers.

use log::*;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{http_error, Error, ErrorKind, HttpErrorKind, IdentityErrorKind};

/// Build the `Accept: application/json` and `Authorization: Bearer <token>` headers
/// sent with profile and validation requests.
pub fn auth_headers(access_token: &str) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let mut auth_value =
        HeaderValue::from_str(&format!("Bearer {}", access_token)).map_err(|e| {
            warn!("Failed to create auth header: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: ErrorKind::Identity(IdentityErrorKind::Decode),
            }
        })?;
    auth_value.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth_value);

    Ok(headers)
}

/// Issue a `GET` and decode the JSON body of a successful response.
///
/// A single attempt is made. Non-2xx responses are returned as
/// `HttpErrorKind::Status` carrying the response body.
pub async fn request_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &Url,
    headers: HeaderMap,
) -> Result<T, Error> {
    let response = client
        .get(url.clone())
        .headers(headers)
        .send()
        .await
        .map_err(|e| {
            warn!("GET {} failed: {:?}", url, e);
            Error::from(e)
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("{} GET {} {}", status.as_u16(), url, body);
        return Err(http_error(
            HttpErrorKind::Status(status.as_u16()),
            &format!("got {} {}", status.as_u16(), body),
        ));
    }

    let body = response.bytes().await?;
    debug!("{} GET {}", status.as_u16(), url);
    serde_json::from_slice(&body).map_err(|e| {
        warn!("Failed to parse response from {}: {:?}", url, e);
        Error {
            source: Some(Box::new(e)),
            error_kind: ErrorKind::Http(HttpErrorKind::InvalidResponse),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    #[test]
    fn test_auth_headers() {
        let headers = auth_headers("abc").unwrap();
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
    }

    #[test]
    fn test_auth_headers_rejects_control_characters() {
        assert!(auth_headers("bad\ntoken").is_err());
    }

    #[tokio::test]
    async fn test_request_json_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/data")
            .match_header("authorization", "Bearer abc")
            .with_status(200)
            .with_body(r#"{"name":"gate"}"#)
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/data", server.url())).unwrap();
        let headers = auth_headers("abc").unwrap();
        let payload: Payload = request_json(&reqwest::Client::new(), &url, headers)
            .await
            .unwrap();

        assert_eq!(payload.name, "gate");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_json_non_success_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/data")
            .with_status(401)
            .with_body("denied")
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/data", server.url())).unwrap();
        let err = request_json::<Payload>(&reqwest::Client::new(), &url, HeaderMap::new())
            .await
            .unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::Http(HttpErrorKind::Status(401)));
    }

    #[tokio::test]
    async fn test_request_json_invalid_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/data")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/data", server.url())).unwrap();
        let err = request_json::<Payload>(&reqwest::Client::new(), &url, HeaderMap::new())
            .await
            .unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::Http(HttpErrorKind::InvalidResponse));
    }
}
