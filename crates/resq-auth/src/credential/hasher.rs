//! Argon2id password hashing and verification.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use argon2::password_hash::{PasswordHash, PasswordHasher as _, Salt, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use subtle::ConstantTimeEq;
use tracing::debug;

use resq_core::config::{AuthConfig, KdfConfig};
use resq_core::error::AppError;

use super::policy::PasswordPolicy;
use super::record::CredentialRecord;
use crate::error::CredentialError;

/// Shortest salt accepted for new records, in bytes.
pub const MIN_SALT_LENGTH: usize = 16;

/// Longest salt that fits a PHC salt segment, in bytes.
pub const MAX_SALT_LENGTH: usize = 48;

/// Shortest derived key accepted for new records, in bytes.
pub const MIN_KEY_LENGTH: usize = 32;

/// Highest memory cost, in KiB, accepted from config or a stored record.
pub const MAX_MEMORY_KIB: u32 = 1024 * 1024;

/// Highest number of passes accepted from config or a stored record.
pub const MAX_ITERATIONS: u32 = 32;

/// Highest parallelism accepted from config or a stored record.
pub const MAX_PARALLELISM: u32 = 16;

/// PHC identifier of the only accepted algorithm.
const ARGON2ID: &str = "argon2id";

/// Hashes and verifies passwords with Argon2id.
///
/// Holds only the cost parameters for new records; verification always uses
/// the parameters stored in the record being checked.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    /// Cost parameters (including output length) for new records.
    params: Params,
    /// Salt length in bytes for new records.
    salt_length: usize,
    /// Policy applied before hashing.
    policy: PasswordPolicy,
}

impl CredentialHasher {
    /// Creates a hasher from auth configuration.
    ///
    /// Fails if the KDF parameters are outside the accepted bounds.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        Self::with_policy(&config.kdf, PasswordPolicy::new(config))
    }

    /// Creates a hasher from explicit KDF settings and policy.
    pub fn with_policy(kdf: &KdfConfig, policy: PasswordPolicy) -> Result<Self, AppError> {
        if !(MIN_SALT_LENGTH..=MAX_SALT_LENGTH).contains(&kdf.salt_length) {
            return Err(AppError::configuration(format!(
                "auth.kdf.salt_length must be between {MIN_SALT_LENGTH} and {MAX_SALT_LENGTH} bytes"
            )));
        }

        if kdf.key_length < MIN_KEY_LENGTH {
            return Err(AppError::configuration(format!(
                "auth.kdf.key_length must be at least {MIN_KEY_LENGTH} bytes"
            )));
        }

        let params = Params::new(
            kdf.memory_kib,
            kdf.iterations,
            kdf.parallelism,
            Some(kdf.key_length),
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        check_cost_ceiling(&params).map_err(|reason| {
            AppError::configuration(format!("Invalid Argon2 parameters: {reason}"))
        })?;

        Ok(Self {
            params,
            salt_length: kdf.salt_length,
            policy,
        })
    }

    /// Returns the policy applied before hashing.
    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Hashes a plaintext password into a new credential record.
    ///
    /// Each call draws a fresh salt, so hashing the same password twice
    /// yields different records.
    pub fn hash(&self, password: &str) -> Result<CredentialRecord, CredentialError> {
        self.policy.validate(password)?;

        let mut salt_bytes = vec![0u8; self.salt_length];
        OsRng.fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| CredentialError::Kdf(format!("salt encoding: {e}")))?;

        let hash = argon2id(Version::V0x13, self.params.clone())
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::Kdf(e.to_string()))?;

        Ok(CredentialRecord::new(hash.to_string()))
    }

    /// Verifies a plaintext password against a stored record.
    ///
    /// Fails closed: malformed records and KDF errors return `false`.
    pub fn verify(&self, password: &str, record: &str) -> bool {
        match self.check(password, record) {
            Ok(()) => true,
            Err(CredentialError::Mismatch) => false,
            Err(e) => {
                debug!(reason = %e, "Credential verification failed");
                false
            }
        }
    }

    /// Verifies a password, reporting why verification failed.
    ///
    /// The derived key is compared in constant time.
    pub fn check(&self, password: &str, record: &str) -> Result<(), CredentialError> {
        let parsed = parse_record(record)?;

        let version = match parsed.version {
            Some(v) => Version::try_from(v)
                .map_err(|e| CredentialError::EncodingError(format!("version: {e}")))?,
            None => Version::V0x13,
        };
        let params = Params::try_from(&parsed)
            .map_err(|e| CredentialError::EncodingError(format!("parameters: {e}")))?;
        // Stored costs drive allocation and run time; refuse corrupted ones.
        check_cost_ceiling(&params).map_err(CredentialError::EncodingError)?;
        let expected = parsed
            .hash
            .ok_or_else(|| CredentialError::EncodingError("missing derived key".to_string()))?;
        let salt = parsed
            .salt
            .ok_or_else(|| CredentialError::EncodingError("missing salt".to_string()))?;

        let mut salt_buf = [0u8; Salt::MAX_LENGTH];
        let salt_bytes = salt
            .decode_b64(&mut salt_buf)
            .map_err(|e| CredentialError::EncodingError(format!("salt: {e}")))?;

        let mut derived = vec![0u8; expected.len()];
        argon2id(version, params)
            .hash_password_into(password.as_bytes(), salt_bytes, &mut derived)
            .map_err(|e| CredentialError::Kdf(e.to_string()))?;

        if bool::from(derived.as_slice().ct_eq(expected.as_bytes())) {
            Ok(())
        } else {
            Err(CredentialError::Mismatch)
        }
    }

    /// Returns `true` when a record was produced with different parameters
    /// than the ones currently configured, or cannot be parsed at all.
    ///
    /// Callers re-hash the password after a successful login when this holds.
    pub fn needs_rehash(&self, record: &str) -> bool {
        let Ok(parsed) = parse_record(record) else {
            return true;
        };

        if parsed.version != Some(u32::from(Version::V0x13)) {
            return true;
        }

        let Ok(stored) = Params::try_from(&parsed) else {
            return true;
        };

        let mut salt_buf = [0u8; Salt::MAX_LENGTH];
        let salt_length = parsed
            .salt
            .and_then(|salt| salt.decode_b64(&mut salt_buf).ok().map(<[u8]>::len));

        stored.m_cost() != self.params.m_cost()
            || stored.t_cost() != self.params.t_cost()
            || stored.p_cost() != self.params.p_cost()
            || parsed.hash.map(|h| h.len()) != self.params.output_len()
            || salt_length != Some(self.salt_length)
    }
}

/// Rejects cost parameters above the verification ceilings.
fn check_cost_ceiling(params: &Params) -> Result<(), String> {
    if params.m_cost() > MAX_MEMORY_KIB {
        return Err(format!("memory cost above {MAX_MEMORY_KIB} KiB"));
    }
    if params.t_cost() > MAX_ITERATIONS {
        return Err(format!("time cost above {MAX_ITERATIONS}"));
    }
    if params.p_cost() > MAX_PARALLELISM {
        return Err(format!("parallelism above {MAX_PARALLELISM}"));
    }
    Ok(())
}

fn argon2id(version: Version, params: Params) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, version, params)
}

/// Parses a PHC string, accepting only Argon2id records.
fn parse_record(record: &str) -> Result<PasswordHash<'_>, CredentialError> {
    let parsed =
        PasswordHash::new(record).map_err(|e| CredentialError::EncodingError(e.to_string()))?;

    if parsed.algorithm.as_str() != ARGON2ID {
        return Err(CredentialError::EncodingError(format!(
            "unsupported algorithm `{}`",
            parsed.algorithm
        )));
    }

    Ok(parsed)
}
