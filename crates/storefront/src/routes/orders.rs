//! Order history route handlers.
//!
//! History prefers the remote order service, falls back to the demo
//! endpoint, and when both are down shows two representative sample
//! orders under an error banner instead of an empty page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use chrono::Utc;
use tracing::warn;

use crate::api::{SourceOutcome, demo};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Order};
use crate::state::AppState;

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub orders: Vec<Order>,
    /// Set when the list is fabricated sample data.
    pub service_down: bool,
    pub user: Option<CurrentUser>,
}

/// Display the user's order history.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let (orders, service_down) = match state.api().user_orders(user.user_id).await {
        SourceOutcome::Primary(orders) | SourceOutcome::Fallback(orders) => (orders, false),
        SourceOutcome::Unavailable(err) => {
            warn!(error = %err, "order history unavailable, showing sample data");
            (demo::demo_orders(user.user_id, Utc::now()), true)
        }
    };

    Ok(OrdersTemplate {
        orders,
        service_down,
        user: Some(user),
    })
}

/// Retry fetching the history (the banner's refresh button).
pub async fn refresh(
    state: State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse> {
    index(state, auth).await
}
