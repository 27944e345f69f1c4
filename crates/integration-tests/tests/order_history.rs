//! Order history, including the sample-data fallback when both order
//! endpoints are unreachable.

use axum::Json;
use axum::routing::get;
use serde_json::json;

use eventhub_integration_tests::{TestApp, envelope, service_down, stub_api};

#[tokio::test]
async fn history_lists_remote_orders() {
    let upstream = stub_api(Vec::new()).route(
        "/api/orders/user/7",
        get(|| async {
            Json(envelope(json!({
                "orders": [{
                    "orderId": "ord_20300912_001",
                    "paymentId": "pay_card_99",
                    "paymentMethod": "card",
                    "items": [{
                        "eventId": 12,
                        "eventName": "Tech Conference 2030",
                        "venue": "Convention Center",
                        "eventDate": "2030-09-12",
                        "eventTime": "18:30",
                        "ticketPrice": 500.0,
                        "quantity": 2
                    }],
                    "attendees": [],
                    "totalAmount": 1000.0,
                    "status": "confirmed"
                }]
            })))
        }),
    );
    let app = TestApp::spawn(upstream).await;
    app.log_in().await;

    let body = app.get_text("/orders").await;
    assert!(body.contains("ord_20300912_001"));
    assert!(body.contains("Tech Conference 2030"));
    assert!(body.contains("2 tickets"));
    assert!(!body.contains("Showing sample data"));
}

#[tokio::test]
async fn history_falls_back_to_sample_orders_when_the_service_is_down() {
    let upstream = stub_api(Vec::new())
        .route("/api/orders/user/7", get(service_down))
        .route("/api/demo/orders/user/7", get(service_down));
    let app = TestApp::spawn(upstream).await;
    app.log_in().await;

    let body = app.get_text("/orders").await;
    assert!(body.contains("Showing sample data"));
    assert!(body.contains("Tech Conference 2024"));
    assert!(body.contains("Music Festival 2024"));
    assert_eq!(body.matches("demo_order_").count(), 2);
}

#[tokio::test]
async fn empty_history_points_back_to_the_catalog() {
    let upstream = stub_api(Vec::new()).route(
        "/api/orders/user/7",
        get(|| async { Json(envelope(json!({ "orders": [] }))) }),
    );
    let app = TestApp::spawn(upstream).await;
    app.log_in().await;

    let body = app.get_text("/orders").await;
    assert!(body.contains("No orders yet"));
}
