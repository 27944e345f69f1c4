//! The booking flow end to end: cart, attendees, simulated payment, and
//! the confirmation page, including the local fallback when the order
//! service cannot be reached.

use axum::routing::post;
use axum::{Json, http::StatusCode};
use serde_json::json;

use eventhub_integration_tests::{TestApp, envelope, event_json, service_down, stub_api};

const EVENT: i32 = 12;

fn upstream_with_event() -> axum::Router {
    stub_api(vec![event_json(
        EVENT,
        "Tech Conference 2030",
        "Convention Center",
        500.0,
    )])
}

async fn book_one_ticket(app: &TestApp) {
    let response = app.post_form("/cart/add", &[("event_id", "12")]).await;
    assert!(response.status().is_success());

    let page = app.get_text("/checkout/attendees").await;
    assert!(page.contains("Tech Conference 2030"));
    assert!(page.contains("ticket 1"));

    let response = app
        .post_form(
            "/checkout/attendees",
            &[
                ("first_name", "Asha"),
                ("last_name", "Rao"),
                ("email", "asha@example.com"),
            ],
        )
        .await;
    assert!(response.status().is_success());
}

#[tokio::test]
async fn booking_records_the_order_remotely() {
    let upstream = upstream_with_event().route(
        "/api/orders/create",
        post(|| async {
            Json(envelope(json!({
                "orderId": "ord_20300912_001",
                "paymentId": "pay_remote_1",
                "paymentMethod": "card",
                "items": [],
                "attendees": [],
                "totalAmount": 500.0,
                "status": "confirmed"
            })))
        }),
    );
    let app = TestApp::spawn(upstream).await;
    app.log_in().await;
    book_one_ticket(&app).await;

    let response = app
        .post_form(
            "/checkout/pay",
            &[
                ("method", "card"),
                ("card_number", "4111 1111 1111 1111"),
                ("expiry", "12/30"),
                ("cvv", "123"),
                ("holder_name", "Asha Rao"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("confirmation body");
    assert!(body.contains("Booking confirmed"));
    assert!(body.contains("ord_20300912_001"));
    assert!(!body.contains("catching up"));
    assert!(body.contains("Asha Rao"));

    // A successful booking empties the cart
    assert_eq!(app.get_text("/cart/count").await, "0");
}

#[tokio::test]
async fn booking_completes_locally_when_order_service_is_down() {
    let upstream = upstream_with_event()
        .route("/api/orders/create", post(service_down))
        .route("/api/demo/orders/create", post(service_down));
    let app = TestApp::spawn(upstream).await;
    app.log_in().await;
    book_one_ticket(&app).await;

    let response = app
        .post_form(
            "/checkout/pay",
            &[
                ("method", "upi"),
                ("upi_id", "asha@okbank"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("confirmation body");
    assert!(body.contains("Booking confirmed"));
    assert!(body.contains("demo_order_"));
    assert!(body.contains("catching up"));

    assert_eq!(app.get_text("/cart/count").await, "0");

    // The confirmation can be revisited from the session
    let again = app.get_text("/checkout/success").await;
    assert!(again.contains("demo_order_"));
}

#[tokio::test]
async fn invalid_card_returns_to_the_payment_step() {
    let app = TestApp::spawn(upstream_with_event()).await;
    app.log_in().await;
    book_one_ticket(&app).await;

    let started = std::time::Instant::now();
    let response = app
        .post_form(
            "/checkout/pay",
            &[
                ("method", "card"),
                ("card_number", "1234"),
                ("expiry", "12/30"),
                ("cvv", "123"),
                ("holder_name", "Asha Rao"),
            ],
        )
        .await;
    // Rejected forms bounce back without the simulated gateway delay
    assert!(started.elapsed() < std::time::Duration::from_secs(2));
    let body = response.text().await.expect("payment page body");
    assert!(body.contains("Card number must be 16 digits"));

    // The cart survives a failed payment attempt
    assert_eq!(app.get_text("/cart/count").await, "1");
}

#[tokio::test]
async fn emptying_the_cart_abandons_the_checkout() {
    let app = TestApp::spawn(upstream_with_event()).await;
    app.log_in().await;

    let response = app.post_form("/cart/add", &[("event_id", "12")]).await;
    assert!(response.status().is_success());
    let page = app.get_text("/checkout/attendees").await;
    assert!(page.contains("ticket 1"));

    let response = app.post_form("/cart/clear", &[]).await;
    assert!(response.status().is_success());
    assert_eq!(app.get_text("/cart/count").await, "0");

    // The stale snapshot must not be resumed
    let body = app.get_text("/checkout/attendees").await;
    assert!(!body.contains("ticket 1"));
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn changing_the_cart_restarts_the_checkout() {
    let app = TestApp::spawn(upstream_with_event()).await;
    app.log_in().await;
    book_one_ticket(&app).await;

    // Another ticket after the attendee step invalidates the snapshot
    let response = app
        .post_form("/cart/update", &[("event_id", "12"), ("quantity", "2")])
        .await;
    assert!(response.status().is_success());

    let body = app.get_text("/checkout/attendees").await;
    assert!(body.contains("ticket 2"));
}

#[tokio::test]
async fn missing_attendee_details_re_render_the_form() {
    let app = TestApp::spawn(upstream_with_event()).await;
    app.log_in().await;

    let response = app.post_form("/cart/add", &[("event_id", "12")]).await;
    assert!(response.status().is_success());
    app.get_text("/checkout/attendees").await;

    let response = app
        .post_form(
            "/checkout/attendees",
            &[
                ("first_name", "Asha"),
                ("last_name", "Rao"),
                ("email", "not-an-email"),
            ],
        )
        .await;
    let body = response.text().await.expect("attendee form body");
    assert!(body.contains("Attendee 1"));
}

#[tokio::test]
async fn checkout_requires_a_signed_in_session() {
    let app = TestApp::spawn(upstream_with_event()).await;

    // Not logged in: the attendee step lands on the login page
    let body = app.get_text("/checkout/attendees").await;
    assert!(body.contains("Log in"));
}
