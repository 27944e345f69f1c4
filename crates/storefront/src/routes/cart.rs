//! Cart route handlers.
//!
//! Quantity changes use HTMX fragments so the cart page updates without
//! a full reload. The cart itself lives wholly in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use eventhub_core::{EventId, Money};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;
use crate::stores::{Cart, CartError, load_cart, save_cart};

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub event_id: EventId,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub event_id: EventId,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub event_id: EventId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: Cart,
    pub total: Money,
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: Cart,
    pub total: Money,
}

/// Error query for the cart page.
#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub error: Option<String>,
}

/// Display the cart page.
pub async fn show(
    OptionalAuth(user): OptionalAuth,
    session: Session,
    axum::extract::Query(query): axum::extract::Query<CartQuery>,
) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartShowTemplate {
        total: cart.total_amount(),
        cart,
        user,
        error: query.error,
    }
}

/// Add an event to the cart from the catalog or detail page.
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let event = state.api().event_details(form.event_id).await?;
    let mut cart = load_cart(&session).await;
    match cart.add_event(event) {
        Ok(()) => {}
        Err(CartError::AlreadyInCart) => {
            return Ok(Redirect::to("/cart?error=already_in_cart").into_response());
        }
    }
    save_cart(&session, &cart)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Redirect::to("/cart").into_response())
}

/// Update a line's ticket quantity (HTMX fragment).
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.set_quantity(form.event_id, form.quantity);
    save_cart(&session, &cart)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(CartItemsTemplate {
        total: cart.total_amount(),
        cart,
    }
    .into_response())
}

/// Remove a line from the cart (HTMX fragment).
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.remove_event(form.event_id);
    save_cart(&session, &cart)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(CartItemsTemplate {
        total: cart.total_amount(),
        cart,
    }
    .into_response())
}

/// Empty the cart.
pub async fn clear(session: Session) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Redirect::to("/cart").into_response())
}

/// Cart count badge (HTMX fragment).
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    Html(cart.total_tickets().to_string())
}
