//! State required by the authentication extractor and middleware.

use std::sync::Arc;

use resq_auth::session::SessionManager;

/// Shared authentication state.
///
/// Embedding services either use it directly as router state or expose it
/// through `FromRef` on their own state type.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// Login flow and token verification.
    pub sessions: Arc<SessionManager>,
}

impl ApiState {
    /// Creates state around a session manager.
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }
}
