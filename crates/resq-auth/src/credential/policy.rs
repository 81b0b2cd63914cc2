//! Password policy enforcement for new passwords.
//!
//! The only strength rule is a minimum length. Six characters is the
//! product's current policy; raising it is a product decision, not a
//! hashing concern.

use resq_core::config::AuthConfig;

use crate::error::CredentialError;

/// Validates new passwords against the configured length policy.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    /// Minimum password length in characters.
    min_length: usize,
}

impl PasswordPolicy {
    /// Creates a policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_min_length(config.password_min_length)
    }

    /// Creates a policy with an explicit minimum length.
    pub fn with_min_length(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Returns the minimum length in characters.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Validates a password. Length is counted in characters, not bytes.
    pub fn validate(&self, password: &str) -> Result<(), CredentialError> {
        if password.is_empty() {
            return Err(CredentialError::EmptyInput);
        }

        if password.chars().count() < self.min_length {
            return Err(CredentialError::WeakInput {
                min_length: self.min_length,
            });
        }

        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), CredentialError> {
        if old_password == new_password {
            return Err(CredentialError::SameAsCurrent);
        }
        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new(&AuthConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_length_from_config() {
        let config = AuthConfig {
            password_min_length: 10,
            ..AuthConfig::default()
        };
        let policy = PasswordPolicy::new(&config);
        assert_eq!(policy.min_length(), 10);
        assert_eq!(PasswordPolicy::default().min_length(), 6);
    }

    #[test]
    fn test_rejects_empty() {
        let policy = PasswordPolicy::default();
        assert_eq!(policy.validate(""), Err(CredentialError::EmptyInput));
    }

    #[test]
    fn test_rejects_short() {
        let policy = PasswordPolicy::default();
        assert_eq!(
            policy.validate("abcde"),
            Err(CredentialError::WeakInput { min_length: 6 })
        );
    }

    #[test]
    fn test_accepts_minimum_length() {
        let policy = PasswordPolicy::default();
        assert!(policy.validate("abcdef").is_ok());
        assert!(policy.validate("s3cret!").is_ok());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let policy = PasswordPolicy::with_min_length(6);
        // Five characters, ten bytes.
        assert!(policy.validate("ééééé").is_err());
        assert!(policy.validate("éééééé").is_ok());
    }

    #[test]
    fn test_validate_not_same() {
        let policy = PasswordPolicy::default();
        assert_eq!(
            policy.validate_not_same("hunter22", "hunter22"),
            Err(CredentialError::SameAsCurrent)
        );
        assert!(policy.validate_not_same("hunter22", "hunter23").is_ok());
    }
}
