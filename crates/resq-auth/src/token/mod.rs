//! HS256 session tokens: claims, signing key, issuance, and verification.
//!
//! Tokens are stateless. There is no server-side revocation: a token stays
//! valid until its `exp` claim passes.

pub mod claims;
pub mod issuer;
pub mod key;
pub mod verifier;

pub use claims::SessionClaims;
pub use issuer::{IssuedToken, TokenIssuer};
pub use key::SigningKey;
pub use verifier::TokenVerifier;

use jsonwebtoken::Algorithm;

/// The only signing algorithm issued or accepted.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;
