//! Encoded credential records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An encoded Argon2id credential in PHC string format:
/// `$argon2id$v=19$m=<KiB>,t=<passes>,p=<lanes>$<salt>$<key>`.
///
/// The record carries its own parameters, so it stays verifiable after the
/// configured costs change. `$` never occurs in the B64 segments.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialRecord(String);

impl CredentialRecord {
    /// Wraps an already-encoded record, e.g. one loaded from storage.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Returns the encoded record.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the record, returning the encoded string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Everything before the salt segment: algorithm, version, parameters.
    fn public_prefix(&self) -> &str {
        // "", "argon2id", "v=19", "m=..,t=..,p=..", salt, key
        match self.0.match_indices('$').nth(3) {
            Some((idx, _)) => &self.0[..idx],
            None => "",
        }
    }
}

impl AsRef<str> for CredentialRecord {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CredentialRecord> for String {
    fn from(record: CredentialRecord) -> Self {
        record.0
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CredentialRecord(\"{}$<redacted>\")", self.public_prefix())
    }
}
