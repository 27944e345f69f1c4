//! Hosted payment gateway route handlers.
//!
//! Separate from the simulated checkout: `/payment` books a single
//! event through the gateway's hosted widget. The page's script calls
//! the JSON endpoints here, which proxy the backend's create-order and
//! verify routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use eventhub_core::EventId;

use crate::api::types::{PaymentOrderRequest, PaymentVerifyRequest};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Event};
use crate::state::AppState;

/// Gateway page query: which event is being booked.
#[derive(Debug, Deserialize)]
pub struct PaymentPageQuery {
    pub event_id: EventId,
}

/// Gateway page template.
#[derive(Template, WebTemplate)]
#[template(path = "payment/gateway.html")]
pub struct GatewayTemplate {
    pub event: Event,
    pub user: Option<CurrentUser>,
}

/// JSON request from the page script to create a gateway order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    pub event_id: EventId,
}

/// JSON response handed to the gateway widget.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub amount: f64,
    pub currency: String,
    pub key_id: String,
}

/// JSON response for the verify callback.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub verified: bool,
    pub message: String,
}

/// Display the hosted gateway page for one event.
pub async fn page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<PaymentPageQuery>,
) -> Result<impl IntoResponse> {
    let event = state.api().event_details(query.event_id).await?;
    Ok(GatewayTemplate {
        event,
        user: Some(user),
    })
}

/// Create a gateway order (JSON, called by the page script).
pub async fn create_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CreateOrderBody>,
) -> Result<Json<CreateOrderResponse>> {
    let event = state.api().event_details(body.event_id).await?;
    let amount = crate::api::types::money_to_f64(event.ticket_price);

    let request = PaymentOrderRequest {
        user_id: user.user_id,
        event_id: body.event_id,
        amount,
    };
    let order = state.api().create_payment_order(&request).await?;

    Ok(Json(CreateOrderResponse {
        order_id: order.order_id,
        amount: order.amount,
        currency: order.currency,
        key_id: state.config().api.gateway_key_id.clone(),
    }))
}

/// Verify a gateway callback (JSON, called by the page script).
pub async fn verify(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(mut body): Json<PaymentVerifyRequest>,
) -> Result<Json<VerifyResponse>> {
    if body.razorpay_signature.is_empty() {
        return Err(AppError::BadRequest("Missing gateway signature".to_string()));
    }
    // The signature binds the logged-in user, not whatever the page sent
    body.user_id = user.user_id;

    let message = state.api().verify_payment(&body).await?;
    Ok(Json(VerifyResponse {
        verified: true,
        message,
    }))
}
