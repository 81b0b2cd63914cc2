//! Shared test helpers for integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::{Value, json};
use tokio::sync::RwLock;
use tower::ServiceExt;

use resq_api::middleware::require_auth;
use resq_api::{ApiState, AuthSubject};
use resq_auth::session::{AuthenticatedSubject, SessionManager};
use resq_core::AppResult;
use resq_core::config::AppConfig;
use resq_core::traits::{CredentialStore, ManualClock, StoredCredential};

/// Test configuration with cheap KDF costs.
pub const TEST_CONFIG: &str = r#"
[auth]
jwt_secret = "integration-test-signing-secret-0123456789"
token_ttl_hours = 24

[auth.kdf]
memory_kib = 1024
iterations = 1
parallelism = 1
"#;

/// In-memory account credentials keyed by login.
#[derive(Default)]
pub struct MemoryCredentialStore {
    accounts: RwLock<HashMap<String, StoredCredential>>,
}

impl MemoryCredentialStore {
    /// Store a credential record for a login.
    pub async fn insert(&self, login: &str, subject_id: &str, record: String) {
        self.accounts.write().await.insert(
            login.to_string(),
            StoredCredential {
                subject_id: subject_id.to_string(),
                record,
            },
        );
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_credential(&self, login: &str) -> AppResult<Option<StoredCredential>> {
        Ok(self.accounts.read().await.get(login).cloned())
    }
}

/// Test application context
pub struct TestApp {
    /// Router with an extractor-protected and a middleware-protected route
    pub router: Router,
    /// Session manager shared with the router
    pub sessions: Arc<SessionManager>,
    /// Account storage behind the session manager
    pub store: Arc<MemoryCredentialStore>,
    /// Clock driving token expiry
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config = AppConfig::from_toml(TEST_CONFIG).expect("Failed to load test config");
        Self::with_config(config)
    }

    /// Create a test application signing with a different secret
    pub fn with_secret(secret: &str) -> Self {
        let mut config = AppConfig::from_toml(TEST_CONFIG).expect("Failed to load test config");
        config.auth.jwt_secret = secret.to_string();
        Self::with_config(config)
    }

    fn with_config(config: AppConfig) -> Self {
        let clock = Arc::new(ManualClock::starting_now());
        let store = Arc::new(MemoryCredentialStore::default());

        let sessions = Arc::new(
            SessionManager::from_config(&config.auth, clock.clone(), store.clone())
                .expect("Failed to build session manager"),
        );
        let state = ApiState::new(Arc::clone(&sessions));

        let guarded = Router::new()
            .route("/guarded", get(guarded_handler))
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                require_auth,
            ));

        let router = Router::new()
            .route("/me", get(me_handler))
            .merge(guarded)
            .with_state(state);

        Self {
            router,
            sessions,
            store,
            clock,
        }
    }

    /// Register an account and return its credential record
    pub async fn create_account(&self, login: &str, subject_id: &str, password: &str) -> String {
        let record = self
            .sessions
            .register(password)
            .await
            .expect("Failed to register account")
            .into_string();
        self.store.insert(login, subject_id, record.clone()).await;
        record
    }

    /// Log in and return the session token
    pub async fn login(&self, login: &str, password: &str) -> String {
        self.sessions
            .login(login, password)
            .await
            .expect("Login failed")
            .token
            .token
    }

    /// Make a GET request with an optional raw Authorization header
    pub async fn get(&self, path: &str, authorization: Option<&str>) -> TestResponse {
        let mut req = Request::builder().method("GET").uri(path);

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req.body(Body::empty()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

async fn me_handler(subject: AuthSubject) -> Json<Value> {
    Json(json!({ "subject": subject.subject_id() }))
}

async fn guarded_handler(Extension(subject): Extension<AuthenticatedSubject>) -> Json<Value> {
    Json(json!({ "subject": subject.subject_id }))
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
