//! Offline subject-claim extraction from structured (JWT-shaped) tokens.
//!
//! The payload is decoded without any signature verification. A subject read here is
//! only as trustworthy as the channel that delivered the token: it came straight from
//! the provider's token endpoint over TLS and is never accepted from the user agent.

use std::fmt;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde_json::{Map, Value};

/// Base64url decoder for token payloads. Padding is optional and non-zero trailing
/// bits are accepted, as some issuers emit both.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Why a subject could not be read from a token.
///
/// All variants are recoverable: callers fall back to a profile lookup.
#[derive(Debug, PartialEq)]
pub enum ClaimError {
    /// The token is not three dot-separated segments.
    NotAToken,
    /// The payload segment is not base64url-encoded JSON.
    Decode(String),
    /// The payload has no `sub` claim, or it is empty.
    MissingClaim,
}

impl fmt::Display for ClaimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClaimError::NotAToken => write!(f, "not a jwt token"),
            ClaimError::Decode(reason) => write!(f, "malformed token payload: {}", reason),
            ClaimError::MissingClaim => write!(f, "missing subject claim"),
        }
    }
}

impl std::error::Error for ClaimError {}

/// Read the `sub` claim embedded in a structured token.
pub fn extract_subject_claim(token: &str) -> Result<String, ClaimError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(ClaimError::NotAToken);
    }

    let bytes = PAYLOAD_ENGINE
        .decode(segments[1])
        .map_err(|e| ClaimError::Decode(e.to_string()))?;

    // Only a JSON object is a claim set; arrays and scalars are malformed payloads.
    let claims: Map<String, Value> =
        serde_json::from_slice(&bytes).map_err(|e| ClaimError::Decode(e.to_string()))?;

    match claims.get("sub") {
        None | Some(Value::Null) => Err(ClaimError::MissingClaim),
        Some(Value::String(sub)) if sub.is_empty() => Err(ClaimError::MissingClaim),
        Some(Value::String(sub)) => Ok(sub.clone()),
        Some(other) => Err(ClaimError::Decode(format!(
            "sub claim is not a string: {}",
            other
        ))),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    /// Build a token whose payload segment encodes `payload`.
    pub(crate) fn token_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload),
            "c2lnbmF0dXJl"
        )
    }

    #[test]
    fn test_extracts_subject() {
        let token = token_with_payload(r#"{"sub":"user@example.com"}"#);
        assert_eq!(extract_subject_claim(&token).unwrap(), "user@example.com");
    }

    #[test]
    fn test_ignores_other_claims() {
        let token =
            token_with_payload(r#"{"iss":"https://idp.example/","sub":"auth0|42","aud":["api"]}"#);
        assert_eq!(extract_subject_claim(&token).unwrap(), "auth0|42");
    }

    #[test]
    fn test_wrong_segment_counts_are_not_tokens() {
        for token in ["", "opaque", "a.b", "a.b.c.d", "....", "x.y.z.w.v"] {
            assert_eq!(
                extract_subject_claim(token),
                Err(ClaimError::NotAToken),
                "{:?}",
                token
            );
        }
    }

    #[test]
    fn test_empty_subject_is_missing_claim() {
        let token = token_with_payload(r#"{"sub":""}"#);
        assert_eq!(extract_subject_claim(&token), Err(ClaimError::MissingClaim));
    }

    #[test]
    fn test_absent_subject_is_missing_claim() {
        let token = token_with_payload(r#"{"email":"user@example.com"}"#);
        assert_eq!(extract_subject_claim(&token), Err(ClaimError::MissingClaim));
    }

    #[test]
    fn test_invalid_base64_is_decode_error() {
        let result = extract_subject_claim("header.!!not-base64!!.signature");
        assert!(matches!(result, Err(ClaimError::Decode(_))));
    }

    #[test]
    fn test_non_json_payload_is_decode_error() {
        let token = format!("h.{}.s", URL_SAFE_NO_PAD.encode("not json"));
        assert!(matches!(
            extract_subject_claim(&token),
            Err(ClaimError::Decode(_))
        ));
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let padded = base64::engine::general_purpose::URL_SAFE.encode(r#"{"sub":"abc"}"#);
        assert!(padded.ends_with("=="));
        let token = format!("h.{}.s", padded);
        assert_eq!(extract_subject_claim(&token).unwrap(), "abc");
    }

    #[test]
    fn test_non_canonical_trailing_bits_are_accepted() {
        // `{"sub":"a"}` with non-zero bits in the final symbol
        assert_eq!(extract_subject_claim("h.eyJzdWIiOiJhIn1.s").unwrap(), "a");
    }

    #[test]
    fn test_array_payload_is_decode_error() {
        for payload in [r#"["victim@example.com"]"#, "[]", r#""user@example.com""#, "42"] {
            let token = token_with_payload(payload);
            assert!(
                matches!(extract_subject_claim(&token), Err(ClaimError::Decode(_))),
                "{}",
                payload
            );
        }
    }

    #[test]
    fn test_null_subject_is_missing_claim() {
        let token = token_with_payload(r#"{"sub":null}"#);
        assert_eq!(extract_subject_claim(&token), Err(ClaimError::MissingClaim));
    }

    #[test]
    fn test_non_string_subject_is_decode_error() {
        let token = token_with_payload(r#"{"sub":12345}"#);
        assert!(matches!(
            extract_subject_claim(&token),
            Err(ClaimError::Decode(_))
        ));
    }
}
