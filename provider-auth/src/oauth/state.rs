//! Anti-forgery state tokens for the login redirect.
//!
//! Binding a state to its redirect target and checking it on the callback belongs to
//! the proxy's session layer; providers only need a fresh opaque value per login.

use rand::Rng;

/// Generate a cryptographically random state token: 32 random bytes, hex encoded.
pub fn generate_state() -> String {
    let random_bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(random_bytes)
}
