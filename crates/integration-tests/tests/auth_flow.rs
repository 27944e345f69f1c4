//! The two-step login (password then OTP) and logout.

use axum::routing::{get, post};
use axum::{Json, Router, http::StatusCode};
use serde_json::json;

use eventhub_integration_tests::{TestApp, envelope, stub_api};

#[tokio::test]
async fn login_with_otp_signs_the_session_in() {
    let app = TestApp::spawn(stub_api(Vec::new())).await;
    app.log_in().await;

    // The nav now shows the account instead of the login link
    let body = app.get_text("/").await;
    assert!(body.contains("asha@example.com"));
    assert!(body.contains("Log out"));
}

#[tokio::test]
async fn bad_credentials_return_to_the_login_page() {
    let upstream = Router::new()
        .route(
            "/events/public",
            get(|| async { Json(envelope(json!([]))) }),
        )
        .route(
            "/user/login",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "statusCode": 401, "message": "Invalid credentials" })),
                )
            }),
        );
    let app = TestApp::spawn(upstream).await;

    let response = app
        .post_form(
            "/auth/login",
            &[("email", "asha@example.com"), ("password", "wrong-pw")],
        )
        .await;
    let body = response.text().await.expect("login page");
    assert!(body.contains("Invalid email or password"));
}

#[tokio::test]
async fn wrong_otp_keeps_the_login_pending() {
    let upstream = Router::new()
        .route(
            "/events/public",
            get(|| async { Json(envelope(json!([]))) }),
        )
        .route("/user/login", post(|| async { Json(envelope(json!(7))) }))
        .route(
            "/user/verify-otp",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "statusCode": 400, "message": "Invalid OTP" })),
                )
            }),
        );
    let app = TestApp::spawn(upstream).await;

    let response = app
        .post_form(
            "/auth/login",
            &[("email", "asha@example.com"), ("password", "pw-123456")],
        )
        .await;
    assert!(response.status().is_success());

    let response = app.post_form("/auth/verify-otp", &[("otp", "000000")]).await;
    let body = response.text().await.expect("otp page");
    assert!(body.contains("That code is wrong or has expired"));

    // Still anonymous
    let body = app.get_text("/").await;
    assert!(!body.contains("Log out"));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let upstream = stub_api(Vec::new()).route(
        "/user/logout",
        post(|| async { Json(envelope(json!("logged out"))) }),
    );
    let app = TestApp::spawn(upstream).await;
    app.log_in().await;

    let response = app.post_form("/auth/logout", &[]).await;
    assert!(response.status().is_success());

    let body = app.get_text("/").await;
    assert!(!body.contains("Log out"));
    assert!(body.contains("Log in"));
}
