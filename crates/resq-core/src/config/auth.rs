//! Authentication configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Credential hashing and session-token configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session-token signing (HMAC-SHA256).
    ///
    /// Has no usable default; token issuance refuses to start without it.
    #[serde(default)]
    pub jwt_secret: String,
    /// Default session-token TTL in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Clock-skew allowance applied to token expiry, in seconds.
    #[serde(default)]
    pub token_leeway_seconds: u64,
    /// Minimum password length in characters.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Argon2id cost parameters for new credential records.
    #[serde(default)]
    pub kdf: KdfConfig,
}

/// Argon2id parameters used when hashing new passwords.
///
/// Existing records carry their own parameters, so changing these values
/// only affects records hashed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Number of passes over memory.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
    /// Salt length in bytes.
    #[serde(default = "default_salt_length")]
    pub salt_length: usize,
    /// Derived key length in bytes.
    #[serde(default = "default_key_length")]
    pub key_length: usize,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.jwt_secret.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &secret)
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("token_leeway_seconds", &self.token_leeway_seconds)
            .field("password_min_length", &self.password_min_length)
            .field("kdf", &self.kdf)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl(),
            token_leeway_seconds: 0,
            password_min_length: default_password_min(),
            kdf: KdfConfig::default(),
        }
    }
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
            salt_length: default_salt_length(),
            key_length: default_key_length(),
        }
    }
}

fn default_token_ttl() -> u64 {
    24
}

fn default_password_min() -> usize {
    6
}

fn default_memory_kib() -> u32 {
    64 * 1024
}

fn default_iterations() -> u32 {
    3
}

fn default_parallelism() -> u32 {
    2
}

fn default_salt_length() -> usize {
    16
}

fn default_key_length() -> usize {
    32
}
