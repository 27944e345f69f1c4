//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Event catalog (filters + sort via query)
//! GET  /events/{id}             - Event detail with Q&A board
//! POST /events/{id}/qa          - Ask a question (requires auth)
//! GET  /health                  - Health check
//! GET  /health/ready            - Readiness check (pings remote API)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                    - Cart page
//! POST /cart/add                - Add event to cart
//! POST /cart/update             - Update ticket quantity (fragment)
//! POST /cart/remove             - Remove line (fragment)
//! POST /cart/clear              - Empty the cart
//! GET  /cart/count              - Cart count badge (fragment)
//!
//! # Checkout (requires auth)
//! GET  /checkout/attendees      - Attendee details step
//! POST /checkout/attendees      - Submit attendees
//! GET  /checkout/payment        - Payment method step
//! POST /checkout/pay            - Simulate payment, record order
//! GET  /checkout/success        - Re-display the confirmation
//!
//! # Orders (requires auth)
//! GET  /orders                  - Order history (with demo fallback)
//! POST /orders/refresh          - Retry fetching the history
//!
//! # Hosted payment gateway (requires auth)
//! GET  /payment?event_id=       - Gateway page for one event
//! POST /payment/create-order    - Create gateway order (JSON)
//! POST /payment/verify          - Verify gateway callback (JSON)
//!
//! # Dashboard (requires auth)
//! GET  /dashboard               - The user's events
//! GET  /dashboard/events/new    - Blank event form
//! POST /dashboard/events        - Create event
//! GET  /dashboard/events/{id}/edit      - Edit form
//! POST /dashboard/events/{id}           - Update event
//! POST /dashboard/events/{id}/delete    - Delete event
//! GET  /dashboard/events/{id}/attendees - Who booked (sample fallback)
//! GET  /dashboard/events/{id}/questions - Q&A management
//! POST /dashboard/events/{id}/answer    - Answer a question
//!
//! # Profile (requires auth)
//! GET  /profile                 - Profile page
//! POST /profile                 - Update display name
//! POST /profile/password        - Change password
//!
//! # Auth
//! GET  /auth/login              - Login page
//! POST /auth/login              - Password step
//! GET  /auth/register           - Register page
//! POST /auth/register           - Register action
//! GET  /auth/verify-otp         - OTP page
//! POST /auth/verify-otp         - OTP step (completes login)
//! POST /auth/resend-otp         - Resend the OTP
//! POST /auth/logout             - Logout action
//! GET  /verify-email?token=     - Email verification link target
//!
//! # Misc
//! GET  /contact                 - Contact page
//! POST /contact                 - Contact form (JSON)
//! *    (anything else)          - Not-found page
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;
pub mod dashboard;
pub mod orders;
pub mod payment;
pub mod profile;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route(
            "/verify-otp",
            get(auth::verify_otp_page).post(auth::verify_otp),
        )
        .route("/resend-otp", post(auth::resend_otp))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/attendees",
            get(checkout::attendees_page).post(checkout::submit_attendees),
        )
        .route("/payment", get(checkout::payment_page))
        .route("/pay", post(checkout::pay))
        .route("/success", get(checkout::success_page))
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/events", post(dashboard::create_event))
        .route("/events/new", get(dashboard::new_event))
        .route("/events/{id}", post(dashboard::update_event))
        .route("/events/{id}/edit", get(dashboard::edit_event))
        .route("/events/{id}/delete", post(dashboard::delete_event))
        .route("/events/{id}/attendees", get(dashboard::attendees))
        .route("/events/{id}/questions", get(dashboard::questions))
        .route("/events/{id}/answer", post(dashboard::answer_question))
}

/// Create the hosted payment gateway routes router.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(payment::page))
        .route("/create-order", post(payment::create_order))
        .route("/verify", post(payment::verify))
}

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub user: Option<CurrentUser>,
}

/// Fallback handler for unknown paths.
pub async fn not_found(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate { user })
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(catalog::index))
        .route("/events/{id}", get(catalog::show))
        .route("/events/{id}/qa", post(catalog::ask_question))
        // Cart
        .nest("/cart", cart_routes())
        // Checkout
        .nest("/checkout", checkout_routes())
        // Orders
        .route("/orders", get(orders::index))
        .route("/orders/refresh", post(orders::refresh))
        // Hosted gateway
        .nest("/payment", payment_routes())
        // Dashboard
        .nest("/dashboard", dashboard_routes())
        // Profile
        .route("/profile", get(profile::show).post(profile::update))
        .route("/profile/password", post(profile::change_password))
        // Auth
        .nest("/auth", auth_routes())
        .route("/verify-email", get(auth::verify_email))
        // Contact
        .route("/contact", get(contact::show).post(contact::submit))
        // Everything else
        .fallback(not_found)
}
