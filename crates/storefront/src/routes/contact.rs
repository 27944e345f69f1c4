//! Contact page route handlers.
//!
//! There is no support backend; submissions are validated, logged with
//! structured fields, and acknowledged.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use eventhub_core::Email;

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact/show.html")]
pub struct ContactTemplate {
    pub user: Option<CurrentUser>,
}

/// Display the contact page.
pub async fn show(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    ContactTemplate { user }
}

/// Submit the contact form.
#[instrument(skip(form), fields(email = %form.email))]
pub async fn submit(Json(form): Json<ContactForm>) -> impl IntoResponse {
    let Ok(email) = Email::parse(&form.email) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse {
                success: false,
                message: Some("Please enter a valid email address.".to_string()),
            }),
        );
    };

    if form.name.trim().is_empty() || form.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse {
                success: false,
                message: Some("Name and message are required.".to_string()),
            }),
        );
    }

    tracing::info!(
        email = %email,
        name = %form.name.trim(),
        "Contact form submitted"
    );
    (
        StatusCode::OK,
        Json(ContactResponse {
            success: true,
            message: None,
        }),
    )
}
