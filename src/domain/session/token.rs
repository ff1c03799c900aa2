//! Opaque session token.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::foundation::ValidationError;

/// Opaque bearer token identifying a session.
///
/// The raw value is kept behind [`SecretString`] and never appears in
/// `Debug` output. Persistent stores key sessions by [`SessionToken::digest`].
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Generates a new random token (two v4 UUIDs, hex without dashes).
    pub fn generate() -> Self {
        let raw = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        Self(SecretString::new(raw))
    }

    /// Wraps a token received from a client, rejecting blank values.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("session_token"));
        }
        Ok(Self(SecretString::new(trimmed.to_string())))
    }

    /// Returns the raw token value.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Hex-encoded SHA-256 digest of the token, used as the storage key.
    pub fn digest(&self) -> String {
        format!("{:x}", Sha256::digest(self.expose().as_bytes()))
    }
}

impl Clone for SessionToken {
    fn clone(&self) -> Self {
        Self(SecretString::new(self.expose().to_string()))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_token_is_64_hex_chars() {
        let token = SessionToken::generate();
        assert_eq!(token.expose().len(), 64);
        assert!(token.expose().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn new_rejects_blank_token() {
        assert!(SessionToken::new("").is_err());
        assert!(SessionToken::new("   ").is_err());
    }

    #[test]
    fn new_trims_surrounding_whitespace() {
        let token = SessionToken::new("  abc  ").unwrap();
        assert_eq!(token.expose(), "abc");
    }

    #[test]
    fn debug_output_is_redacted() {
        let token = SessionToken::new("super-secret").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn digest_is_stable_and_not_the_token() {
        let token = SessionToken::new("abc").unwrap();
        assert_eq!(
            token.digest(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(token.digest(), token.clone().digest());
    }
}
