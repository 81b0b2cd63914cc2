//! Session-token creation with an injected key and clock.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Header, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use resq_core::config::AuthConfig;
use resq_core::error::AppError;
use resq_core::traits::Clock;

use super::TOKEN_ALGORITHM;
use super::claims::SessionClaims;
use super::key::SigningKey;
use crate::error::TokenError;

/// Creates signed HS256 session tokens.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    /// HMAC key for signing.
    key: SigningKey,
    /// TTL used by [`TokenIssuer::issue_default`].
    default_ttl: Duration,
    /// Source of the issuance instant.
    clock: Arc<dyn Clock>,
}

/// A freshly issued token and its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The signed bearer token.
    pub token: String,
    /// Instant after which the token is rejected.
    pub expires_at: DateTime<Utc>,
}

impl TokenIssuer {
    /// Creates an issuer from an explicit key, default TTL, and clock.
    pub fn new(key: SigningKey, default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            key,
            default_ttl,
            clock,
        }
    }

    /// Creates an issuer from auth configuration.
    ///
    /// Fails if the signing secret is missing or too short, or the default
    /// TTL is zero.
    pub fn from_config(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let key = SigningKey::from_secret(&config.jwt_secret)?;

        let hours = i64::try_from(config.token_ttl_hours)
            .ok()
            .filter(|h| *h > 0)
            .and_then(Duration::try_hours)
            .ok_or_else(|| {
                AppError::configuration("auth.token_ttl_hours must be a positive number of hours")
            })?;

        Ok(Self::new(key, hours, clock))
    }

    /// Returns the default TTL.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issues a token for `subject` with the default TTL.
    pub fn issue_default(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.issue(subject, self.default_ttl)
    }

    /// Issues a token for `subject` that expires `ttl` from now.
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<IssuedToken, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::InvalidSubject);
        }

        if ttl <= Duration::zero() {
            return Err(TokenError::InvalidTtl);
        }

        let now = self.clock.now();
        let expires_at = now.checked_add_signed(ttl).ok_or(TokenError::InvalidTtl)?;

        let claims = SessionClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(TOKEN_ALGORITHM), &claims, self.key.encoding())
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        debug!(subject = %subject, expires_at = %expires_at, "Issued session token");

        Ok(IssuedToken { token, expires_at })
    }
}
