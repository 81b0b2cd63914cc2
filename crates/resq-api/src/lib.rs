//! # resq-api
//!
//! The request-authentication collaborator for ResQ HTTP services built on
//! Axum: bearer-token extraction, an authenticating middleware and extractor,
//! and mapping of `AppError` to HTTP responses.
//!
//! Routes are defined by the embedding service, not here.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod state;

pub use error::ApiError;
pub use extractors::AuthSubject;
pub use state::ApiState;
