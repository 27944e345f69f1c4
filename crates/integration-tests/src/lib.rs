//! In-process integration harness for the EventHub storefront.
//!
//! Each test spins up two servers on ephemeral local ports: a stub of the
//! remote EventHub JSON API (an [`axum::Router`] speaking the backend's
//! `{statusCode, message, data}` envelope) and a storefront pointed at it.
//! A cookie-holding [`reqwest::Client`] then drives the storefront the way
//! a browser would, redirects and all.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    routing::{get, post},
};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use eventhub_storefront::app::build_app;
use eventhub_storefront::config::{EventHubApiConfig, StorefrontConfig};
use eventhub_storefront::state::AppState;

/// Wrap a payload in the remote API's response envelope.
#[must_use]
pub fn envelope(data: Value) -> Value {
    json!({ "statusCode": 200, "message": "success", "data": data })
}

/// An event in the remote wire format, dated well in the future so it
/// shows up regardless of when the tests run.
#[must_use]
pub fn event_json(event_id: i32, name: &str, venue: &str, price: f64) -> Value {
    json!({
        "eventId": event_id,
        "eventName": name,
        "description": format!("All about {name}."),
        "venue": venue,
        "eventDate": "2030-09-12",
        "eventTime": "18:30",
        "ticketPrice": price,
        "eventCategory": "CONCERT",
        "privacySettings": "PUBLIC"
    })
}

/// Stub handler for an upstream endpoint that is down.
pub async fn service_down() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "statusCode": 500, "message": "service unavailable" })),
    )
}

/// A stub of the remote API covering the endpoints every flow touches:
/// the public event list, event details, and a login/OTP pair that
/// accepts any credentials as user 7. Tests chain `.route(...)` onto the
/// result for the endpoints they exercise.
#[must_use]
pub fn stub_api(events: Vec<Value>) -> Router {
    let list = envelope(Value::Array(events.clone()));
    Router::new()
        .route(
            "/events/public",
            get(move || {
                let body = list.clone();
                async move { Json(body) }
            }),
        )
        .route(
            "/events/details",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let events = events.clone();
                async move {
                    let wanted = params.get("eventId").cloned().unwrap_or_default();
                    events
                        .iter()
                        .find(|event| event["eventId"].to_string() == wanted)
                        .cloned()
                        .map_or_else(
                            || {
                                (
                                    StatusCode::NOT_FOUND,
                                    Json(json!({ "statusCode": 404, "message": "no such event" })),
                                )
                            },
                            |event| (StatusCode::OK, Json(envelope(event))),
                        )
                }
            }),
        )
        .route("/user/login", post(|| async { Json(envelope(json!(7))) }))
        .route(
            "/user/verify-otp",
            post(|| async { Json(envelope(json!("verified"))) }),
        )
}

/// Serve a router on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve router");
    });
    format!("http://{addr}")
}

fn test_config(upstream_url: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().expect("loopback address"),
        port: 0,
        base_url: "http://storefront.test".to_string(),
        session_secret: SecretString::from("k".repeat(32)),
        api: EventHubApiConfig {
            base_url: upstream_url.trim_end_matches('/').to_string(),
            gateway_key_id: "rzp_test_demo".to_string(),
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// A running storefront wired to a stub upstream.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Start the given upstream stub and a storefront pointed at it.
    pub async fn spawn(upstream: Router) -> Self {
        let upstream_url = serve(upstream).await;
        let app = build_app(AppState::new(test_config(&upstream_url)));
        let base_url = serve(app).await;
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("build http client");
        Self { base_url, client }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }

    /// GET a path and return the response body.
    pub async fn get_text(&self, path: &str) -> String {
        self.get(path).await.text().await.expect("response body")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request")
    }

    /// Complete the password and OTP steps against the permissive stub,
    /// leaving the client's cookie jar holding a signed-in session.
    pub async fn log_in(&self) {
        let response = self
            .post_form(
                "/auth/login",
                &[("email", "asha@example.com"), ("password", "pw-123456")],
            )
            .await;
        assert!(response.status().is_success(), "login step failed");

        let response = self.post_form("/auth/verify-otp", &[("otp", "123456")]).await;
        assert!(response.status().is_success(), "otp step failed");
    }
}
