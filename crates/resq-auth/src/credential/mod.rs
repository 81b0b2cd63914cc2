//! Password hashing and policy enforcement.

pub mod hasher;
pub mod policy;
pub mod record;

pub use hasher::CredentialHasher;
pub use policy::PasswordPolicy;
pub use record::CredentialRecord;
