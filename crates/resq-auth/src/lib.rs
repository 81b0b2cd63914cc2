//! # resq-auth
//!
//! Credential and session-token core for ResQ.
//!
//! ## Modules
//!
//! - `credential` — Argon2id password hashing, verification, and length policy
//! - `token` — HS256 session tokens: issuance and verification
//! - `session` — Registration/login/authentication flow over a credential store
//! - `error` — Domain errors and their mapping into `AppError`
//!
//! Every primitive is synchronous and holds only read-only configuration,
//! so instances can be shared behind an `Arc` across request handlers.

pub mod credential;
pub mod error;
pub mod session;
pub mod token;

pub use credential::{CredentialHasher, CredentialRecord, PasswordPolicy};
pub use error::{CredentialError, TokenError};
pub use session::{AuthenticatedSubject, LoginOutcome, SessionManager};
pub use token::{IssuedToken, SessionClaims, SigningKey, TokenIssuer, TokenVerifier};
