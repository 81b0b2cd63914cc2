//! Custom Axum extractors.

pub mod auth;

pub use auth::{AuthSubject, extract_bearer};
