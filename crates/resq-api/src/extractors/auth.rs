//! `AuthSubject` extractor: pulls the bearer token from the Authorization
//! header, verifies it, and exposes the subject to handlers.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use resq_auth::error::INVALID_TOKEN_MESSAGE;
use resq_auth::session::AuthenticatedSubject;
use resq_core::error::AppError;

use crate::error::ApiError;
use crate::state::ApiState;

/// Authenticated subject available in handlers.
#[derive(Debug, Clone)]
pub struct AuthSubject(pub AuthenticatedSubject);

impl AuthSubject {
    /// Returns the subject identifier.
    pub fn subject_id(&self) -> &str {
        &self.0.subject_id
    }
}

impl std::ops::Deref for AuthSubject {
    type Target = AuthenticatedSubject;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Returns the token from an `Authorization: Bearer <token>` value.
///
/// A missing prefix or an empty token fails with the same error as an
/// invalid token.
pub fn extract_bearer(header_value: &str) -> Result<&str, AppError> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized(INVALID_TOKEN_MESSAGE))
}

/// Authenticates the request described by `headers`.
pub fn authenticate_headers(
    state: &ApiState,
    headers: &HeaderMap,
) -> Result<AuthenticatedSubject, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized(INVALID_TOKEN_MESSAGE))?;

    let token = extract_bearer(header)?;
    state.sessions.authenticate(token)
}

impl<S> FromRequestParts<S> for AuthSubject
where
    ApiState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Already resolved by the `require_auth` middleware.
        if let Some(subject) = parts.extensions.get::<AuthenticatedSubject>() {
            return Ok(AuthSubject(subject.clone()));
        }

        let state = ApiState::from_ref(state);
        let subject = authenticate_headers(&state, &parts.headers)?;
        Ok(AuthSubject(subject))
    }
}
