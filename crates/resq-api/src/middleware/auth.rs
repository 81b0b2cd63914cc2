//! Bearer-token authentication middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::extractors::auth::authenticate_headers;
use crate::state::ApiState;

/// Rejects requests without a valid bearer token and stores the resolved
/// `AuthenticatedSubject` in the request extensions.
///
/// Install with `axum::middleware::from_fn_with_state(state, require_auth)`.
pub async fn require_auth(
    State(state): State<ApiState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let subject = authenticate_headers(&state, request.headers())?;
    tracing::debug!(subject = %subject.subject_id, "Request authenticated");
    request.extensions_mut().insert(subject);
    Ok(next.run(request).await)
}
