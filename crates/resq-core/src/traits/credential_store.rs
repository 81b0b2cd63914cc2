//! Lookup of stored credentials, implemented by the account persistence layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// The credential material an account collaborator keeps for one login.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    /// Opaque subject identifier placed in issued session tokens.
    pub subject_id: String,
    /// Encoded credential record produced by the credential hasher.
    pub record: String,
}

impl std::fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredential")
            .field("subject_id", &self.subject_id)
            .field("record", &"<redacted>")
            .finish()
    }
}

/// Resolves a login name (username, email, ...) to its stored credential.
///
/// Logins are passed through exactly as the caller received them.
/// Implementations own normalization (for example lowercasing and trimming
/// email addresses) and must apply the same rule when accounts are created.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Find the credential for a login, or `None` if no such account exists.
    async fn find_credential(&self, login: &str) -> AppResult<Option<StoredCredential>>;
}
