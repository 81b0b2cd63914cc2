//! Symmetric signing key shared by the issuer and verifier.

use std::fmt;

use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::error::TokenError;

/// Shortest accepted HMAC secret, in bytes (the HS256 output size).
pub const MIN_SECRET_LENGTH: usize = 32;

/// HMAC-SHA256 key material, injected into issuer and verifier at construction.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    /// Builds a key from a configured secret.
    ///
    /// Rejects empty secrets and secrets shorter than [`MIN_SECRET_LENGTH`].
    pub fn from_secret(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::Signing("signing secret is not set".to_string()));
        }

        if secret.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::Signing(format!(
                "signing secret must be at least {MIN_SECRET_LENGTH} bytes"
            )));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    pub(crate) fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}
