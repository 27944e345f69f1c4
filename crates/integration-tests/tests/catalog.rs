//! Catalog filtering and sorting through the query string, plus the
//! health probes.

use eventhub_integration_tests::{TestApp, event_json, stub_api};

fn upstream() -> axum::Router {
    stub_api(vec![
        event_json(1, "Summer Beats", "Riverside Stadium", 300.0),
        event_json(2, "Tech Conference 2030", "Convention Center", 500.0),
        event_json(3, "Street Food Fair", "Old Town Square", 50.0),
    ])
}

#[tokio::test]
async fn catalog_lists_all_public_events() {
    let app = TestApp::spawn(upstream()).await;

    let body = app.get_text("/").await;
    assert!(body.contains("Summer Beats"));
    assert!(body.contains("Tech Conference 2030"));
    assert!(body.contains("Street Food Fair"));
}

#[tokio::test]
async fn search_narrows_the_listing() {
    let app = TestApp::spawn(upstream()).await;

    let body = app.get_text("/?search=tech").await;
    assert!(body.contains("Tech Conference 2030"));
    assert!(!body.contains("Summer Beats"));
}

#[tokio::test]
async fn untouched_filter_form_lists_everything() {
    let app = TestApp::spawn(upstream()).await;

    // Browsers submit every input, empty or not
    let response = app
        .get("/?search=&venue=&date=&category=&sort=date")
        .await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.expect("catalog body");
    assert!(body.contains("Summer Beats"));
    assert!(body.contains("Tech Conference 2030"));
    assert!(body.contains("Street Food Fair"));
}

#[tokio::test]
async fn venue_filter_matches_substrings() {
    let app = TestApp::spawn(upstream()).await;

    let body = app.get_text("/?venue=stadium").await;
    assert!(body.contains("Summer Beats"));
    assert!(!body.contains("Street Food Fair"));
}

#[tokio::test]
async fn price_sort_orders_the_cards() {
    let app = TestApp::spawn(upstream()).await;

    let body = app.get_text("/?sort=price-desc").await;
    let expensive = body.find("Tech Conference 2030").expect("card missing");
    let cheap = body.find("Street Food Fair").expect("card missing");
    assert!(expensive < cheap);

    let body = app.get_text("/?sort=price-asc").await;
    let expensive = body.find("Tech Conference 2030").expect("card missing");
    let cheap = body.find("Street Food Fair").expect("card missing");
    assert!(cheap < expensive);
}

#[tokio::test]
async fn event_detail_page_shows_the_event() {
    let app = TestApp::spawn(upstream()).await;

    let body = app.get_text("/events/2").await;
    assert!(body.contains("Tech Conference 2030"));
    assert!(body.contains("Convention Center"));

    let response = app.get("/events/999").await;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_probes_respond() {
    let app = TestApp::spawn(upstream()).await;

    let response = app.get("/health").await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.expect("health body"), "ok");

    let response = app.get("/health/ready").await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn unknown_paths_render_the_not_found_page() {
    let app = TestApp::spawn(upstream()).await;

    let response = app.get("/nope").await;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}
