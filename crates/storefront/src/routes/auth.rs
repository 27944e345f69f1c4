//! Authentication route handlers.
//!
//! Login is two-step: a password check that yields a user id, then an
//! OTP emailed by the backend. Only after OTP verification does the
//! session hold a [`CurrentUser`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use eventhub_core::Email;

use crate::api::types::{LoginRequest, RegisterRequest};
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, PendingLogin, session_keys};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// OTP form data.
#[derive(Debug, Deserialize)]
pub struct OtpForm {
    pub otp: String,
}

/// Email verification link query.
#[derive(Debug, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: Option<String>,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

/// OTP verification page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/verify_otp.html")]
pub struct VerifyOtpTemplate {
    pub email: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Email verification result template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/verify_email.html")]
pub struct VerifyEmailTemplate {
    pub verified: bool,
    pub message: String,
}

// =============================================================================
// Login
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Handle login form submission: password check, then OTP challenge.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let Ok(email) = Email::parse(&form.email) else {
        return Redirect::to("/auth/login?error=invalid_email").into_response();
    };

    let request = LoginRequest {
        email: email.to_string(),
        password: form.password,
    };
    match state.api().login(&request).await {
        Ok(user_id) => {
            let pending = PendingLogin { user_id, email };
            if let Err(e) = session.insert(session_keys::PENDING_LOGIN, &pending).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/auth/login?error=session").into_response();
            }
            Redirect::to("/auth/verify-otp").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            Redirect::to("/auth/login?error=credentials").into_response()
        }
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate { error: query.error }
}

/// Handle registration form submission.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return Redirect::to("/auth/register?error=password_mismatch").into_response();
    }
    if form.password.len() < 8 {
        return Redirect::to("/auth/register?error=password_too_short").into_response();
    }
    let Ok(email) = Email::parse(&form.email) else {
        return Redirect::to("/auth/register?error=invalid_email").into_response();
    };
    if form.name.trim().is_empty() {
        return Redirect::to("/auth/register?error=name_required").into_response();
    }

    let request = RegisterRequest {
        name: form.name.trim().to_string(),
        email: email.to_string(),
        password: form.password,
    };
    match state.api().register(&request).await {
        Ok(user) => {
            // Account exists; the emailed OTP still has to be verified
            let pending = PendingLogin {
                user_id: user.user_id,
                email,
            };
            if let Err(e) = session.insert(session_keys::PENDING_LOGIN, &pending).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/auth/login?error=session").into_response();
            }
            Redirect::to("/auth/verify-otp").into_response()
        }
        Err(e) => {
            tracing::warn!("Registration failed: {}", e);
            let message = e.to_string();
            if message.contains("taken") || message.contains("already") {
                Redirect::to("/auth/register?error=email_taken").into_response()
            } else {
                Redirect::to("/auth/register?error=failed").into_response()
            }
        }
    }
}

// =============================================================================
// OTP Verification
// =============================================================================

async fn pending_login(session: &Session) -> Option<PendingLogin> {
    session
        .get::<PendingLogin>(session_keys::PENDING_LOGIN)
        .await
        .ok()
        .flatten()
}

/// Display the OTP form for a pending login.
pub async fn verify_otp_page(
    session: Session,
    Query(query): Query<MessageQuery>,
) -> Response {
    let Some(pending) = pending_login(&session).await else {
        return Redirect::to("/auth/login").into_response();
    };
    VerifyOtpTemplate {
        email: pending.email.to_string(),
        error: query.error,
        success: query.success,
    }
    .into_response()
}

/// Handle OTP form submission, completing the login.
pub async fn verify_otp(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<OtpForm>,
) -> Response {
    let Some(pending) = pending_login(&session).await else {
        return Redirect::to("/auth/login").into_response();
    };

    match state
        .api()
        .verify_otp(pending.email.as_str(), form.otp.trim())
        .await
    {
        Ok(_) => {
            let user = CurrentUser {
                user_id: pending.user_id,
                email: pending.email,
                name: None,
            };
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/auth/login?error=session").into_response();
            }
            let _ = session
                .remove::<PendingLogin>(session_keys::PENDING_LOGIN)
                .await;
            set_sentry_user(&user.user_id, Some(user.email.as_str()));
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!("OTP verification failed: {}", e);
            Redirect::to("/auth/verify-otp?error=invalid_otp").into_response()
        }
    }
}

/// Ask the backend to email a fresh OTP.
pub async fn resend_otp(State(state): State<AppState>, session: Session) -> Response {
    let Some(pending) = pending_login(&session).await else {
        return Redirect::to("/auth/login").into_response();
    };
    match state.api().resend_otp(pending.email.as_str()).await {
        Ok(_) => Redirect::to("/auth/verify-otp?success=otp_sent").into_response(),
        Err(e) => {
            tracing::warn!("OTP resend failed: {}", e);
            Redirect::to("/auth/verify-otp?error=resend_failed").into_response()
        }
    }
}

// =============================================================================
// Email Verification
// =============================================================================

/// Handle the verification link from the registration email.
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> Response {
    let Some(token) = query.token.filter(|t| !t.is_empty()) else {
        return VerifyEmailTemplate {
            verified: false,
            message: "The verification link is missing its token.".to_string(),
        }
        .into_response();
    };

    match state.api().verify_email(&token).await {
        Ok(message) => VerifyEmailTemplate {
            verified: true,
            message,
        }
        .into_response(),
        Err(e) => {
            tracing::warn!("Email verification failed: {}", e);
            VerifyEmailTemplate {
                verified: false,
                message: "This verification link is invalid or has expired.".to_string(),
            }
            .into_response()
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout: notify the backend, then drop the session user.
pub async fn logout(State(state): State<AppState>, session: Session) -> Response {
    if let Ok(Some(user)) = session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
    {
        // Best effort; local logout proceeds regardless
        if let Err(e) = state.api().logout(user.user_id).await {
            tracing::warn!("Remote logout failed: {}", e);
        }
    }

    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    clear_sentry_user();
    Redirect::to("/").into_response()
}
