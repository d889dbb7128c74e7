//! Authorization (login) URL construction.

use url::Url;

use super::endpoints::{EndpointSet, ProviderIdentity};

/// Parameters replaced on every login URL, whatever the authorize endpoint carries.
///
/// The client identifier is always sent as `client_id`. A `client` parameter
/// pre-seeded on the authorize URL is passed through untouched and never filled in.
const OVERRIDDEN_PARAMS: [&str; 4] = [
    "redirect_uri",
    "approval_prompt",
    "client_id",
    "response_type",
];

/// Build the URL the user agent is redirected to in order to log in.
///
/// Query parameters already present on the authorize endpoint are preserved.
/// `redirect_uri`, `approval_prompt`, `client_id` and `response_type` are replaced,
/// while `scope` and `state` are appended next to any pre-seeded values.
pub fn build_login_url(
    endpoints: &EndpointSet,
    identity: &ProviderIdentity,
    redirect_uri: &str,
    state: &str,
) -> Url {
    let mut url = endpoints.authorize_url().clone();

    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !OVERRIDDEN_PARAMS.iter().any(|p| *p == *key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    params.push(("redirect_uri".to_string(), redirect_uri.to_string()));
    params.push((
        "approval_prompt".to_string(),
        identity.approval_prompt().to_string(),
    ));
    params.push(("scope".to_string(), identity.scope().to_string()));
    params.push(("client_id".to_string(), identity.client_id().to_string()));
    params.push(("response_type".to_string(), "code".to_string()));
    params.push(("state".to_string(), state.to_string()));

    url.query_pairs_mut().clear().extend_pairs(params);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> ProviderIdentity {
        ProviderIdentity::new("client-123", Some("openid profile email"), "openid", None).unwrap()
    }

    fn endpoints(authorize: &str) -> EndpointSet {
        EndpointSet::new(
            authorize,
            "https://idp.example/oauth/token",
            "https://idp.example/userinfo",
            None,
        )
        .unwrap()
    }

    fn values(url: &Url, key: &str) -> Vec<String> {
        url.query_pairs()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .collect()
    }

    #[test]
    fn test_login_url_end_to_end() {
        let url = build_login_url(
            &endpoints("https://idp.example/authorize"),
            &identity(),
            "https://app.example/callback",
            "abc123",
        );

        assert_eq!(url.host_str(), Some("idp.example"));
        assert_eq!(url.path(), "/authorize");

        let query = url.query().unwrap();
        assert!(query.contains("state=abc123"));
        assert!(query.contains("redirect_uri=https%3A%2F%2Fapp.example%2Fcallback"));
    }

    #[test]
    fn test_login_url_contains_exactly_mandated_params() {
        let url = build_login_url(
            &endpoints("https://idp.example/authorize"),
            &identity(),
            "https://app.example/callback",
            "abc123",
        );

        let mut keys: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "approval_prompt",
                "client_id",
                "redirect_uri",
                "response_type",
                "scope",
                "state"
            ]
        );
        assert_eq!(values(&url, "client_id"), vec!["client-123"]);
        assert_eq!(values(&url, "response_type"), vec!["code"]);
        assert_eq!(values(&url, "approval_prompt"), vec!["force"]);
        assert_eq!(values(&url, "scope"), vec!["openid profile email"]);
        assert!(values(&url, "client").is_empty());
    }

    #[test]
    fn test_login_url_is_idempotent() {
        let endpoints = endpoints("https://idp.example/authorize");
        let first = build_login_url(&endpoints, &identity(), "https://app.example/cb", "s1");
        let second = build_login_url(&endpoints, &identity(), "https://app.example/cb", "s1");
        assert_eq!(first, second);
    }

    #[test]
    fn test_login_url_preserves_and_overrides_existing_query() {
        let url = build_login_url(
            &endpoints(
                "https://idp.example/authorize?audience=api&response_type=token&state=seed&scope=offline_access",
            ),
            &identity(),
            "https://app.example/callback",
            "abc123",
        );

        assert_eq!(values(&url, "audience"), vec!["api"]);
        assert_eq!(values(&url, "response_type"), vec!["code"]);
        assert_eq!(values(&url, "state"), vec!["seed", "abc123"]);
        assert_eq!(
            values(&url, "scope"),
            vec!["offline_access", "openid profile email"]
        );
    }

    #[test]
    fn test_login_url_leaves_legacy_client_param_alone() {
        let url = build_login_url(
            &endpoints("https://idp.example/authorize?client=legacy"),
            &identity(),
            "https://app.example/callback",
            "abc123",
        );

        assert_eq!(values(&url, "client"), vec!["legacy"]);
        assert_eq!(values(&url, "client_id"), vec!["client-123"]);
    }

    #[test]
    fn test_login_url_tolerates_malformed_query() {
        let url = build_login_url(
            &endpoints("https://idp.example/authorize?%%&=&redirect_uri"),
            &identity(),
            "https://app.example/callback",
            "abc123",
        );

        assert_eq!(
            values(&url, "redirect_uri"),
            vec!["https://app.example/callback"]
        );
        assert_eq!(values(&url, "state"), vec!["abc123"]);
    }
}
