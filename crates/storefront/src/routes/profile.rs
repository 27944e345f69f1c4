//! Profile route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::Result;
use crate::filters;
use crate::middleware::{RequireAuth, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Profile update form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub name: String,
}

/// Change password form data.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/show.html")]
pub struct ProfileTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
    pub user: Option<CurrentUser>,
}

/// Display the profile page.
pub async fn show(
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    ProfileTemplate {
        error: query.error,
        success: query.success,
        user: Some(user),
    }
}

/// Handle a display name update.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<ProfileForm>,
) -> Result<Response> {
    let name = form.name.trim();
    if name.is_empty() {
        return Ok(Redirect::to("/profile?error=name_required").into_response());
    }

    match state.api().update_profile(user.email.as_str(), name).await {
        Ok(updated) => {
            let refreshed = CurrentUser {
                user_id: user.user_id,
                email: user.email,
                name: Some(updated.name),
            };
            if let Err(e) = set_current_user(&session, &refreshed).await {
                tracing::error!("Failed to refresh session user: {}", e);
            }
            Ok(Redirect::to("/profile?success=updated").into_response())
        }
        Err(e) => {
            tracing::warn!("Profile update failed: {}", e);
            Ok(Redirect::to("/profile?error=update_failed").into_response())
        }
    }
}

/// Handle a password change.
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ChangePasswordForm>,
) -> Result<Response> {
    if form.new_password != form.new_password_confirm {
        return Ok(Redirect::to("/profile?error=password_mismatch").into_response());
    }
    if form.new_password.len() < 8 {
        return Ok(Redirect::to("/profile?error=password_too_short").into_response());
    }

    match state
        .api()
        .change_password(user.email.as_str(), &form.old_password, &form.new_password)
        .await
    {
        Ok(_) => Ok(Redirect::to("/profile?success=password_changed").into_response()),
        Err(e) => {
            tracing::warn!("Password change failed: {}", e);
            Ok(Redirect::to("/profile?error=password_change_failed").into_response())
        }
    }
}
