//! Core traits defined in `resq-core` and implemented by other crates.

pub mod clock;
pub mod credential_store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use credential_store::{CredentialStore, StoredCredential};
