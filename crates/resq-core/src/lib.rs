//! # resq-core
//!
//! Core crate for ResQ. Contains configuration schemas and loading,
//! the clock abstraction, collaborator traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ResQ crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
