//! Login flow and request authentication.

pub mod manager;

pub use manager::{AuthenticatedSubject, LoginOutcome, SessionManager};
