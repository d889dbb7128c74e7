//! HTTP helpers for talking to identity providers.

mod client;
mod request;

pub use client::{ClientBuilder, HttpClientConfig};
pub use request::{auth_headers, request_json};
