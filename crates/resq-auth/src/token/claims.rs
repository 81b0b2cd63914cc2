//! Session-token claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the opaque account identifier.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl SessionClaims {
    /// Returns the subject identifier.
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Returns the issuance instant.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or_default()
    }

    /// Returns the expiration instant.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Checks whether the token is expired at `now`, allowing `leeway_seconds`.
    ///
    /// A token is still valid during the second named by `exp`.
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway_seconds: i64) -> bool {
        now.timestamp() > self.exp.saturating_add(leeway_seconds)
    }
}

/// Claims as they appear on the wire, before presence checks.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct WireClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl WireClaims {
    /// Converts into complete claims, or `None` if `sub` or `exp` is absent.
    pub fn into_claims(self) -> Option<SessionClaims> {
        let sub = self.sub.filter(|s| !s.is_empty())?;
        let exp = self.exp?;
        Some(SessionClaims {
            sub,
            iat: self.iat.unwrap_or_default(),
            exp,
        })
    }
}
