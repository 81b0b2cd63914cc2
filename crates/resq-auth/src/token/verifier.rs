//! Session-token validation.
//!
//! Checks, in order:
//! 1. Three-segment structure and a decodable header
//! 2. Header `alg` is exactly HS256, before any MAC work
//! 3. MAC under the configured key
//! 4. Presence of `sub` and `exp`
//! 5. Expiry against the injected clock

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Validation, decode};
use serde::Deserialize;

use resq_core::config::AuthConfig;
use resq_core::error::AppError;
use resq_core::traits::Clock;

use super::TOKEN_ALGORITHM;
use super::claims::{SessionClaims, WireClaims};
use super::key::SigningKey;
use crate::error::TokenError;

/// The part of a JWT header inspected before signature verification.
#[derive(Debug, Deserialize)]
struct HeaderProbe {
    #[serde(default)]
    alg: Option<String>,
}

/// Validates session tokens against a single key and algorithm.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC key for verification.
    key: SigningKey,
    /// Signature-only validation; claims are checked against `clock`.
    validation: Validation,
    /// Clock-skew allowance in seconds.
    leeway_seconds: i64,
    /// Source of the current instant.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithm", &TOKEN_ALGORITHM)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a verifier from an explicit key, leeway, and clock.
    pub fn new(key: SigningKey, leeway_seconds: u64, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        // Expiry and claim presence are enforced here against the injected
        // clock, not by jsonwebtoken against system time.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            key,
            validation,
            leeway_seconds: i64::try_from(leeway_seconds).unwrap_or(i64::MAX),
            clock,
        }
    }

    /// Creates a verifier from auth configuration.
    pub fn from_config(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let key = SigningKey::from_secret(&config.jwt_secret)?;
        Ok(Self::new(key, config.token_leeway_seconds, clock))
    }

    /// Verifies a token and returns its subject identifier.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_claims(token).map(|claims| claims.sub)
    }

    /// Verifies a token and returns its full claim set.
    pub fn verify_claims(&self, token: &str) -> Result<SessionClaims, TokenError> {
        check_algorithm(token)?;

        let wire = decode::<WireClaims>(token, self.key.decoding(), &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature => TokenError::BadSignature,
                JwtErrorKind::InvalidAlgorithm => {
                    TokenError::DisallowedAlgorithm("unknown".to_string())
                }
                _ => TokenError::Malformed,
            })?
            .claims;

        let claims = wire.into_claims().ok_or(TokenError::MissingClaims)?;

        if claims.is_expired_at(self.clock.now(), self.leeway_seconds) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

/// Rejects any token whose header does not name exactly HS256.
fn check_algorithm(token: &str) -> Result<(), TokenError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| TokenError::Malformed)?;
    let probe: HeaderProbe = serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)?;
    let alg = probe.alg.ok_or(TokenError::Malformed)?;

    if alg != "HS256" {
        return Err(TokenError::DisallowedAlgorithm(alg));
    }

    Ok(())
}
