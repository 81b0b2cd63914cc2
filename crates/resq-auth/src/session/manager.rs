//! Registration, login, and request authentication over the credential core.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use resq_core::config::AuthConfig;
use resq_core::error::AppError;
use resq_core::traits::{Clock, CredentialStore};

use crate::credential::{CredentialHasher, CredentialRecord};
use crate::error::{CredentialError, INVALID_CREDENTIALS_MESSAGE, INVALID_TOKEN_MESSAGE};
use crate::token::{IssuedToken, TokenIssuer, TokenVerifier};

/// Password hashed once at startup and verified against when a login does
/// not exist, so unknown and known accounts cost the same.
const DUMMY_PASSWORD: &str = "resq-placeholder-credential";

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Subject identifier of the authenticated account.
    pub subject_id: String,
    /// Session token for subsequent requests.
    pub token: IssuedToken,
    /// Whether the stored record uses outdated KDF parameters.
    pub needs_rehash: bool,
}

/// The identity resolved from a verified session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedSubject {
    /// Subject identifier from the token.
    pub subject_id: String,
    /// Instant at which the presented token expires.
    pub expires_at: DateTime<Utc>,
}

/// Composes the hasher, issuer, and verifier for the account layer.
///
/// Hashing and password checks run on the blocking thread pool.
#[derive(Clone)]
pub struct SessionManager {
    /// Password hasher.
    hasher: Arc<CredentialHasher>,
    /// Token issuer.
    issuer: Arc<TokenIssuer>,
    /// Token verifier.
    verifier: Arc<TokenVerifier>,
    /// Account credential lookup.
    store: Arc<dyn CredentialStore>,
    /// Record checked when a login is unknown.
    dummy_record: CredentialRecord,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("hasher", &self.hasher)
            .field("issuer", &self.issuer)
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a session manager from its parts.
    pub fn new(
        hasher: Arc<CredentialHasher>,
        issuer: Arc<TokenIssuer>,
        verifier: Arc<TokenVerifier>,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, AppError> {
        let dummy_record = hasher.hash(DUMMY_PASSWORD)?;

        Ok(Self {
            hasher,
            issuer,
            verifier,
            store,
            dummy_record,
        })
    }

    /// Builds every component from auth configuration.
    ///
    /// Fails on any misconfiguration; callers treat that as fatal at startup.
    pub fn from_config(
        config: &AuthConfig,
        clock: Arc<dyn Clock>,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, AppError> {
        let hasher = Arc::new(CredentialHasher::new(config)?);
        let issuer = Arc::new(TokenIssuer::from_config(config, Arc::clone(&clock))?);
        let verifier = Arc::new(TokenVerifier::from_config(config, clock)?);

        Self::new(hasher, issuer, verifier, store)
    }

    /// Returns the hasher.
    pub fn hasher(&self) -> &CredentialHasher {
        &self.hasher
    }

    /// Returns the token issuer.
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Returns the token verifier.
    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Hashes a new account's password.
    pub async fn register(&self, password: &str) -> Result<CredentialRecord, AppError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();

        let record = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))??;

        Ok(record)
    }

    /// Authenticates a login/password pair and issues a session token.
    ///
    /// Unknown logins and wrong passwords produce the same error.
    pub async fn login(&self, login: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let stored = self.store.find_credential(login).await?;

        let Some(stored) = stored else {
            // Result is discarded; only the cost matters.
            let _ = self
                .check_blocking(password, self.dummy_record.as_str())
                .await;
            info!("Login rejected: unknown account");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        match self.check_blocking(password, &stored.record).await? {
            Ok(()) => {}
            Err(CredentialError::Mismatch) => {
                info!(subject = %stored.subject_id, "Login rejected: wrong password");
                return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
            }
            Err(e) => {
                if matches!(e, CredentialError::EncodingError(_)) {
                    // Rejected before any KDF work; pay the same cost as a real check.
                    let _ = self
                        .check_blocking(password, self.dummy_record.as_str())
                        .await;
                }
                warn!(subject = %stored.subject_id, reason = %e, "Stored credential is unusable");
                return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
            }
        }

        let token = self.issuer.issue_default(&stored.subject_id)?;
        let needs_rehash = self.hasher.needs_rehash(&stored.record);

        info!(subject = %stored.subject_id, needs_rehash, "Login succeeded");

        Ok(LoginOutcome {
            subject_id: stored.subject_id,
            token,
            needs_rehash,
        })
    }

    /// Replaces a password after verifying the current one.
    pub async fn change_password(
        &self,
        current_record: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<CredentialRecord, AppError> {
        if self
            .check_blocking(current_password, current_record)
            .await?
            .is_err()
        {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        self.hasher
            .policy()
            .validate_not_same(current_password, new_password)?;

        self.register(new_password).await
    }

    /// Verifies a bearer token and resolves its subject.
    ///
    /// Every failure yields the same unauthorized error; the specific reason
    /// is only logged.
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedSubject, AppError> {
        match self.verifier.verify_claims(token) {
            Ok(claims) => Ok(AuthenticatedSubject {
                expires_at: claims.expires_at(),
                subject_id: claims.sub,
            }),
            Err(e) => {
                debug!(reason = %e, "Session token rejected");
                Err(AppError::unauthorized(INVALID_TOKEN_MESSAGE))
            }
        }
    }

    async fn check_blocking(
        &self,
        password: &str,
        record: &str,
    ) -> Result<Result<(), CredentialError>, AppError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let record = record.to_owned();

        tokio::task::spawn_blocking(move || hasher.check(&password, &record))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))
    }
}
