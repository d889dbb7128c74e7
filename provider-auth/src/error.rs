//! Error types for the `provider-auth` crate.
//!
//! Follows the same pattern as the other workspace crates with a root Error struct
//! and error kind enums.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for provider-auth crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in provider-auth.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    Config(ConfigErrorKind),
    Identity(IdentityErrorKind),
    Http(HttpErrorKind),
}

/// Errors raised while building provider configuration at startup.
#[derive(Debug, PartialEq)]
pub enum ConfigErrorKind {
    MissingDomain,
    MissingEndpoint,
    InvalidUrl,
    InsecureUrl,
    MissingClientId,
}

/// Errors from resolving a user identity out of a session.
#[derive(Debug, PartialEq)]
pub enum IdentityErrorKind {
    MissingToken,
    Decode,
    MissingClaim,
    NoEmail,
}

/// Errors from HTTP requests against the identity provider.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    BuilderFailed,
    RequestFailed,
    Network,
    Status(u16),
    InvalidResponse,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let detail = self
            .source
            .as_ref()
            .map(|s| format!(": {}", s))
            .unwrap_or_default();
        match &self.error_kind {
            ErrorKind::Config(kind) => write!(f, "Configuration error: {:?}{}", kind, detail),
            ErrorKind::Identity(kind) => write!(f, "Identity error: {:?}{}", kind, detail),
            ErrorKind::Http(kind) => write!(f, "HTTP error: {:?}{}", kind, detail),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error_kind = if err.is_builder() {
            ErrorKind::Http(HttpErrorKind::BuilderFailed)
        } else if err.is_request() {
            ErrorKind::Http(HttpErrorKind::RequestFailed)
        } else if err.is_decode() {
            ErrorKind::Http(HttpErrorKind::InvalidResponse)
        } else {
            ErrorKind::Http(HttpErrorKind::Network)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Config(ConfigErrorKind::InvalidUrl),
        }
    }
}

/// Helper function to create configuration errors.
pub fn config_error(kind: ConfigErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Config(kind),
    }
}

/// Helper function to create identity errors.
pub fn identity_error(kind: IdentityErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Identity(kind),
    }
}

/// Helper function to create HTTP errors.
pub fn http_error(kind: HttpErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Http(kind),
    }
}
