//! Checkout route handlers.
//!
//! The flow is attendees -> payment -> success. Each POST advances the
//! session-held [`Checkout`] machine; GETs on later steps redirect back
//! when the machine is not there yet. Payment is simulated: a short
//! processing delay, structural validation, then the order is recorded
//! remotely with a local fallback so the booking always completes.

use std::time::Duration;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, warn};

use eventhub_core::{Money, OrderId};

use crate::api::SourceOutcome;
use crate::api::types::OrderRequest;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Order};
use crate::state::AppState;
use crate::stores::{
    AttendeeEntry, AttendeeFormError, AttendeeSlot, Checkout, CheckoutError, CheckoutStep,
    PaymentDetails, clear_checkout, load_cart, load_checkout, save_cart, save_checkout,
};

/// Simulated gateway processing delay.
const PAYMENT_PROCESSING_DELAY: Duration = Duration::from_secs(2);

// =============================================================================
// Templates
// =============================================================================

/// Attendee details step template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/attendees.html")]
pub struct AttendeesTemplate {
    pub slots: Vec<AttendeeSlot>,
    pub errors: Vec<AttendeeFormError>,
    pub total: Money,
    pub user: Option<CurrentUser>,
}

/// Payment step template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/payment.html")]
pub struct PaymentTemplate {
    pub total: Money,
    pub ticket_count: u32,
    pub error: Option<String>,
    pub user: Option<CurrentUser>,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct SuccessTemplate {
    pub order: Order,
    pub recorded_locally: bool,
    pub user: Option<CurrentUser>,
}

// =============================================================================
// Forms
// =============================================================================

/// Group the attendee form's repeated `first_name`/`last_name`/`email`
/// fields into one entry per ticket, in form order.
fn attendee_entries(pairs: &[(String, String)]) -> Vec<AttendeeEntry> {
    fn values<'a>(
        pairs: &'a [(String, String)],
        key: &'static str,
    ) -> impl Iterator<Item = String> + 'a {
        pairs
            .iter()
            .filter(move |(k, _)| k.as_str() == key)
            .map(|(_, v)| v.clone())
    }
    values(pairs, "first_name")
        .zip(values(pairs, "last_name"))
        .zip(values(pairs, "email"))
        .map(|((first_name, last_name), email)| AttendeeEntry {
            first_name,
            last_name,
            email,
        })
        .collect()
}

/// Payment step form. Fields are optional because the form only submits
/// the inputs for the chosen method.
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    pub method: String,
    pub card_number: Option<String>,
    pub expiry: Option<String>,
    pub cvv: Option<String>,
    pub holder_name: Option<String>,
    pub upi_id: Option<String>,
    pub bank: Option<String>,
}

impl PaymentForm {
    fn into_details(self) -> Result<PaymentDetails> {
        match self.method.as_str() {
            "card" => Ok(PaymentDetails::Card {
                number: self.card_number.unwrap_or_default(),
                expiry: self.expiry.unwrap_or_default(),
                cvv: self.cvv.unwrap_or_default(),
                holder_name: self.holder_name.unwrap_or_default(),
            }),
            "upi" => Ok(PaymentDetails::Upi {
                vpa: self.upi_id.unwrap_or_default(),
            }),
            "netbanking" => Ok(PaymentDetails::NetBanking {
                bank: self.bank.unwrap_or_default(),
            }),
            other => Err(AppError::BadRequest(format!(
                "Unknown payment method: {other}"
            ))),
        }
    }
}

/// Error query for the payment page.
#[derive(Debug, Deserialize)]
pub struct PaymentQuery {
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Start checkout: snapshot the cart and show the attendee form.
pub async fn attendees_page(
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Response> {
    // Resume an in-flight checkout, but only while its cart snapshot is
    // still current. Anything stale restarts from the cart.
    let cart = load_cart(&session).await;
    let existing = load_checkout(&session)
        .await
        .filter(|checkout| checkout.matches_cart(&cart));
    let checkout = match existing {
        Some(existing) if *existing.step() == CheckoutStep::CollectingAttendees => existing,
        Some(existing) if *existing.step() == CheckoutStep::SelectingPayment => {
            return Ok(Redirect::to("/checkout/payment").into_response());
        }
        _ => {
            let checkout = match Checkout::begin(&cart) {
                Ok(checkout) => checkout,
                Err(CheckoutError::EmptyCart) => {
                    clear_checkout(&session)
                        .await
                        .map_err(|e| AppError::Internal(e.to_string()))?;
                    return Ok(Redirect::to("/cart").into_response());
                }
                Err(err) => return Err(AppError::Validation(err.to_string())),
            };
            save_checkout(&session, &checkout)
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;
            checkout
        }
    };

    Ok(AttendeesTemplate {
        slots: checkout.attendee_slots(),
        errors: Vec::new(),
        total: checkout.total_amount(),
        user: Some(user),
    }
    .into_response())
}

/// Handle the attendee form submission.
pub async fn submit_attendees(
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let Some(mut checkout) = load_checkout(&session).await else {
        return Ok(Redirect::to("/cart").into_response());
    };

    match checkout.submit_attendees(&attendee_entries(&pairs)) {
        Ok(()) => {
            save_checkout(&session, &checkout)
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;
            Ok(Redirect::to("/checkout/payment").into_response())
        }
        Err((CheckoutError::WrongStep, _)) => {
            Ok(Redirect::to("/checkout/attendees").into_response())
        }
        Err((err, errors)) if errors.is_empty() => Err(AppError::Validation(err.to_string())),
        Err((_, errors)) => Ok(AttendeesTemplate {
            slots: checkout.attendee_slots(),
            errors,
            total: checkout.total_amount(),
            user: Some(user),
        }
        .into_response()),
    }
}

/// Show the payment method form.
pub async fn payment_page(
    RequireAuth(user): RequireAuth,
    session: Session,
    axum::extract::Query(query): axum::extract::Query<PaymentQuery>,
) -> Result<Response> {
    let Some(checkout) = load_checkout(&session).await else {
        return Ok(Redirect::to("/cart").into_response());
    };
    if !checkout.matches_cart(&load_cart(&session).await) {
        clear_checkout(&session)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        return Ok(Redirect::to("/cart").into_response());
    }
    if *checkout.step() != CheckoutStep::SelectingPayment {
        return Ok(Redirect::to("/checkout/attendees").into_response());
    }

    let ticket_count = checkout.items().iter().map(|item| item.quantity).sum();
    Ok(PaymentTemplate {
        total: checkout.total_amount(),
        ticket_count,
        error: query.error,
        user: Some(user),
    }
    .into_response())
}

/// Simulate the payment and record the order.
///
/// Recording prefers the remote order service and falls back to the
/// demo endpoint; when both are down the order is kept locally with a
/// fabricated id so the booking still completes.
pub async fn pay(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<PaymentForm>,
) -> Result<Response> {
    let Some(mut checkout) = load_checkout(&session).await else {
        return Ok(Redirect::to("/cart").into_response());
    };
    if !checkout.matches_cart(&load_cart(&session).await) {
        clear_checkout(&session)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        return Ok(Redirect::to("/cart").into_response());
    }

    let details = form.into_details()?;
    let method = details.method();

    // Validate before the simulated gateway delay; a rejected form
    // should bounce back immediately
    let now = Utc::now();
    let payment_id = match checkout.submit_payment(&details, now) {
        Ok(payment_id) => payment_id,
        Err(CheckoutError::WrongStep) => {
            return Ok(Redirect::to("/checkout/attendees").into_response());
        }
        Err(CheckoutError::InvalidPayment(message)) => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("error", &message)
                .finish();
            return Ok(Redirect::to(&format!("/checkout/payment?{query}")).into_response());
        }
        Err(err) => return Err(AppError::Validation(err.to_string())),
    };

    tokio::time::sleep(PAYMENT_PROCESSING_DELAY).await;

    // Record remotely first so the real id ends up on the confirmation
    let draft = checkout.finalize_order(
        user.user_id,
        payment_id.clone(),
        method,
        OrderId::demo(now.timestamp_millis()),
        now,
    )?;
    let mut request = OrderRequest::from_order(&draft);
    request.payment_details = details.record();

    let (order_id, recorded_locally) = match state.api().create_order(&request).await {
        SourceOutcome::Primary(order_id) => (order_id, false),
        SourceOutcome::Fallback(order_id) => {
            info!(order_id = %order_id, "order recorded via demo endpoint");
            (order_id, false)
        }
        SourceOutcome::Unavailable(err) => {
            warn!(error = %err, "order service unavailable, keeping local record");
            (OrderId::demo(now.timestamp_millis()), true)
        }
    };

    let order =
        checkout.finalize_order(user.user_id, payment_id, method, order_id.clone(), now)?;
    checkout.complete(order_id);
    save_checkout(&session, &checkout)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    session
        .insert(crate::models::session_keys::LAST_ORDER, &order)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // The booking went through; the cart is done
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let success = SuccessTemplate {
        recorded_locally,
        order,
        user: Some(user),
    };
    clear_checkout(&session)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(success.into_response())
}

/// Re-display the confirmation for the most recent order.
pub async fn success_page(RequireAuth(user): RequireAuth, session: Session) -> Result<Response> {
    let order: Option<Order> = session
        .get(crate::models::session_keys::LAST_ORDER)
        .await
        .ok()
        .flatten();
    match order {
        Some(order) => Ok(SuccessTemplate {
            recorded_locally: order.order_id.is_demo(),
            order,
            user: Some(user),
        }
        .into_response()),
        None => Ok(Redirect::to("/orders").into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_attendee_entries_group_in_form_order() {
        let pairs = vec![
            pair("first_name", "John"),
            pair("last_name", "Doe"),
            pair("email", "john@example.com"),
            pair("first_name", "Jane"),
            pair("last_name", "Doe"),
            pair("email", "jane@example.com"),
        ];
        let entries = attendee_entries(&pairs);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].first_name, "John");
        assert_eq!(entries[1].email, "jane@example.com");
    }

    #[test]
    fn test_payment_form_maps_methods() {
        let form = PaymentForm {
            method: "upi".to_string(),
            card_number: None,
            expiry: None,
            cvv: None,
            holder_name: None,
            upi_id: Some("john@upi".to_string()),
            bank: None,
        };
        assert!(matches!(
            form.into_details().unwrap(),
            PaymentDetails::Upi { .. }
        ));

        let form = PaymentForm {
            method: "cash".to_string(),
            card_number: None,
            expiry: None,
            cvv: None,
            holder_name: None,
            upi_id: None,
            bank: None,
        };
        assert!(form.into_details().is_err());
    }
}
