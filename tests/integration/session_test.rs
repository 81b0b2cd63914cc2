//! Registration, login, and token lifecycle through the session manager.

use chrono::Duration;

use resq_core::error::ErrorKind;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_login_authenticate() {
    let app = TestApp::new();
    app.create_account("alice@example.com", "user-42", "s3cret!")
        .await;

    let token = app.login("alice@example.com", "s3cret!").await;
    let subject = app.sessions.authenticate(&token).expect("authenticate");

    assert_eq!(subject.subject_id, "user-42");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.create_account("alice@example.com", "user-42", "s3cret!")
        .await;

    let err = app
        .sessions
        .login("alice@example.com", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_login_unknown_account_matches_wrong_password() {
    let app = TestApp::new();
    app.create_account("alice@example.com", "user-42", "s3cret!")
        .await;

    let unknown = app
        .sessions
        .login("nobody@example.com", "s3cret!")
        .await
        .unwrap_err();
    let wrong = app
        .sessions
        .login("alice@example.com", "not-the-password")
        .await
        .unwrap_err();

    assert_eq!(unknown.kind, wrong.kind);
    assert_eq!(unknown.message, wrong.message);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new();
    let err = app.sessions.register("12345").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_records_are_unique_per_registration() {
    let app = TestApp::new();
    let first = app.create_account("a@example.com", "user-1", "same-pass").await;
    let second = app.create_account("b@example.com", "user-2", "same-pass").await;

    assert_ne!(first, second);
    assert!(!first.contains("same-pass"));
}

#[tokio::test]
async fn test_token_expires_after_default_ttl() {
    let app = TestApp::new();
    app.create_account("alice@example.com", "user-42", "s3cret!")
        .await;
    let token = app.login("alice@example.com", "s3cret!").await;

    app.clock.advance(Duration::hours(23));
    assert!(app.sessions.authenticate(&token).is_ok());

    app.clock.advance(Duration::hours(2));
    let err = app.sessions.authenticate(&token).unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_parallel_logins() {
    let app = TestApp::new();
    for i in 0..4 {
        app.create_account(&format!("user{i}@example.com"), &format!("user-{i}"), "s3cret!")
            .await;
    }

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let sessions = app.sessions.clone();
            tokio::spawn(async move {
                sessions
                    .login(&format!("user{i}@example.com"), "s3cret!")
                    .await
                    .map(|outcome| outcome.subject_id)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let subject = handle.await.expect("task").expect("login");
        assert_eq!(subject, format!("user-{i}"));
    }
}
