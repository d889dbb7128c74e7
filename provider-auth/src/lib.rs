//! # provider-auth
//!
//! Identity-provider adapters for the authenticating proxy:
//! - Provider endpoint configuration with fail-fast validation
//! - Authorization (login) URL construction
//! - Offline subject-claim extraction from structured tokens
//! - Email resolution with a profile-endpoint fallback
//! - Session access-token validation
//!
//! ## Architecture
//!
//! Each identity provider implements the [`oauth::Provider`] trait and is selected
//! once at startup through [`oauth::providers::from_config`]. Providers are immutable
//! after configuration and are shared across request handlers as `Arc<dyn Provider>`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use provider_auth::oauth::{providers, Provider, SessionState};
//!
//! let provider = providers::from_config(settings)?;
//! let url = provider.login_url("https://app.example/oauth2/callback", &state);
//! let email = provider.email_address(&session).await?;
//! let still_valid = provider.validate_session(&session).await;
//! ```

pub mod error;
pub mod http;
pub mod oauth;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
