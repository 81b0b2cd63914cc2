//! Domain errors for credentials and session tokens.
//!
//! The variants are deliberately fine-grained for diagnostics and tests.
//! Converting into [`AppError`] collapses every token-verification failure
//! to one indistinguishable unauthorized error.

use resq_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Public message for every rejected session token.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Public message for every rejected login.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Failures while hashing or checking a password.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// The password was empty.
    #[error("password must not be empty")]
    EmptyInput,
    /// The password is shorter than the minimum length policy.
    #[error("password must be at least {min_length} characters long")]
    WeakInput {
        /// Configured minimum length in characters.
        min_length: usize,
    },
    /// The new password equals the current one.
    #[error("new password must be different from the current password")]
    SameAsCurrent,
    /// The stored credential record could not be decoded.
    #[error("malformed credential record: {0}")]
    EncodingError(String),
    /// The key derivation function rejected its inputs or parameters.
    #[error("key derivation failed: {0}")]
    Kdf(String),
    /// The password does not match the record.
    #[error("password does not match")]
    Mismatch,
}

/// Failures while issuing or verifying a session token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token is not a well-formed JWT.
    #[error("token is malformed")]
    Malformed,
    /// The token declares an algorithm other than the single accepted one.
    #[error("token algorithm `{0}` is not accepted")]
    DisallowedAlgorithm(String),
    /// The MAC does not verify under the configured key.
    #[error("token signature is invalid")]
    BadSignature,
    /// The token is past its expiry instant.
    #[error("token has expired")]
    Expired,
    /// The token lacks a subject or an expiry.
    #[error("token is missing required claims")]
    MissingClaims,
    /// An empty subject was passed to issuance.
    #[error("subject identifier must not be empty")]
    InvalidSubject,
    /// A non-positive TTL was passed to issuance.
    #[error("token TTL must be positive")]
    InvalidTtl,
    /// The signing key is missing or unusable, or signing failed.
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::EmptyInput
            | CredentialError::WeakInput { .. }
            | CredentialError::SameAsCurrent => {
                AppError::with_source(ErrorKind::Validation, err.to_string(), err)
            }
            CredentialError::Mismatch | CredentialError::EncodingError(_) => {
                AppError::with_source(ErrorKind::Unauthorized, INVALID_CREDENTIALS_MESSAGE, err)
            }
            CredentialError::Kdf(_) => {
                AppError::with_source(ErrorKind::Internal, "Password hashing failed", err)
            }
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidSubject | TokenError::InvalidTtl => {
                AppError::with_source(ErrorKind::Validation, err.to_string(), err)
            }
            TokenError::Signing(_) => {
                AppError::with_source(ErrorKind::Configuration, err.to_string(), err)
            }
            TokenError::Malformed
            | TokenError::DisallowedAlgorithm(_)
            | TokenError::BadSignature
            | TokenError::Expired
            | TokenError::MissingClaims => AppError::unauthorized(INVALID_TOKEN_MESSAGE),
        }
    }
}
