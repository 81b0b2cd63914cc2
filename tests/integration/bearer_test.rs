//! Bearer-token authentication at the HTTP boundary.

use axum::http::StatusCode;
use chrono::Duration;

use resq_auth::error::INVALID_TOKEN_MESSAGE;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_me_authenticated() {
    let app = TestApp::new();
    app.create_account("alice@example.com", "user-42", "s3cret!")
        .await;
    let token = app.login("alice@example.com", "s3cret!").await;

    let response = app.get("/me", Some(&format!("Bearer {token}"))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["subject"], "user-42");
}

#[tokio::test]
async fn test_middleware_attaches_subject() {
    let app = TestApp::new();
    app.create_account("alice@example.com", "user-42", "s3cret!")
        .await;
    let token = app.login("alice@example.com", "s3cret!").await;

    let response = app.get("/guarded", Some(&format!("Bearer {token}"))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["subject"], "user-42");
}

#[tokio::test]
async fn test_rejections_are_indistinguishable() {
    let app = TestApp::new();
    app.create_account("alice@example.com", "user-42", "s3cret!")
        .await;
    let token = app.login("alice@example.com", "s3cret!").await;

    let mut tampered = token.clone();
    tampered.pop();
    tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

    let no_header = app.get("/me", None).await;
    let wrong_scheme = app.get("/me", Some(&format!("Token {token}"))).await;
    let garbage = app.get("/me", Some("Bearer garbage")).await;
    let forged = app.get("/me", Some(&format!("Bearer {tampered}"))).await;

    app.clock.advance(Duration::hours(25));
    let expired = app.get("/me", Some(&format!("Bearer {token}"))).await;
    let expired_guarded = app.get("/guarded", Some(&format!("Bearer {token}"))).await;

    for response in [
        &no_header,
        &wrong_scheme,
        &garbage,
        &forged,
        &expired,
        &expired_guarded,
    ] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["error"], "UNAUTHORIZED");
        assert_eq!(response.body["message"], INVALID_TOKEN_MESSAGE);
    }
}

#[tokio::test]
async fn test_token_from_other_deployment_rejected() {
    let app = TestApp::new();
    let other = TestApp::with_secret("a-different-deployment-secret-abcdefgh");
    other
        .create_account("alice@example.com", "user-42", "s3cret!")
        .await;
    let foreign = other.login("alice@example.com", "s3cret!").await;

    let response = app.get("/me", Some(&format!("Bearer {foreign}"))).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
