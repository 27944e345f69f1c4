//! Cart behavior over HTTP: add, dedupe, quantity updates, removal, and
//! the count badge fragment.

use eventhub_integration_tests::{TestApp, event_json, stub_api};

fn upstream() -> axum::Router {
    stub_api(vec![
        event_json(12, "Tech Conference 2030", "Convention Center", 500.0),
        event_json(34, "Summer Beats", "Riverside Stadium", 300.0),
    ])
}

#[tokio::test]
async fn add_then_adjust_then_remove() {
    let app = TestApp::spawn(upstream()).await;

    // The cart works without signing in
    let body = app.get_text("/cart").await;
    assert!(body.contains("Your cart is empty"));

    let response = app.post_form("/cart/add", &[("event_id", "12")]).await;
    let body = response.text().await.expect("cart page");
    assert!(body.contains("Tech Conference 2030"));
    assert_eq!(app.get_text("/cart/count").await, "1");

    // Quantity updates return the table fragment
    let response = app
        .post_form("/cart/update", &[("event_id", "12"), ("quantity", "3")])
        .await;
    let fragment = response.text().await.expect("cart fragment");
    assert!(fragment.contains("3 tickets"));
    assert_eq!(app.get_text("/cart/count").await, "3");

    let response = app.post_form("/cart/remove", &[("event_id", "12")]).await;
    let fragment = response.text().await.expect("cart fragment");
    assert!(fragment.contains("Your cart is empty"));
    assert_eq!(app.get_text("/cart/count").await, "0");
}

#[tokio::test]
async fn adding_the_same_event_twice_is_rejected() {
    let app = TestApp::spawn(upstream()).await;

    app.post_form("/cart/add", &[("event_id", "12")]).await;
    let response = app.post_form("/cart/add", &[("event_id", "12")]).await;
    let body = response.text().await.expect("cart page");
    assert!(body.contains("already in your cart"));
    assert_eq!(app.get_text("/cart/count").await, "1");
}

#[tokio::test]
async fn quantity_zero_drops_the_line() {
    let app = TestApp::spawn(upstream()).await;

    app.post_form("/cart/add", &[("event_id", "12")]).await;
    app.post_form("/cart/add", &[("event_id", "34")]).await;
    assert_eq!(app.get_text("/cart/count").await, "2");

    let response = app
        .post_form("/cart/update", &[("event_id", "12"), ("quantity", "0")])
        .await;
    let fragment = response.text().await.expect("cart fragment");
    assert!(!fragment.contains("Tech Conference 2030"));
    assert!(fragment.contains("Summer Beats"));
}

#[tokio::test]
async fn adding_an_unknown_event_fails() {
    let app = TestApp::spawn(upstream()).await;

    let response = app.post_form("/cart/add", &[("event_id", "999")]).await;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(app.get_text("/cart/count").await, "0");
}
