//! User account endpoints: registration, login, OTP, profile.
//!
//! The remote API identifies callers by explicit user/email parameters;
//! there are no tokens to hold on to. A successful password login only
//! yields a user id - the session is not considered authenticated until
//! the OTP sent by the backend is verified.

use tracing::instrument;

use eventhub_core::UserId;

use super::types::{LoginRequest, RegisterRequest, UserDto};
use super::{ApiError, EventHubClient};

impl EventHubClient {
    /// Register a new account. The backend emails an OTP to verify.
    ///
    /// # Errors
    ///
    /// Returns an error when registration is rejected (e.g. the email is
    /// already taken) or the call fails.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserDto, ApiError> {
        self.post("/user/register", request).await
    }

    /// Password login. Returns the user id; an OTP challenge follows.
    ///
    /// # Errors
    ///
    /// Returns an error on bad credentials or transport failure.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<UserId, ApiError> {
        let user_id: i32 = self.post("/user/login", request).await?;
        Ok(UserId::new(user_id))
    }

    /// Verify the OTP emailed after login/registration.
    ///
    /// # Errors
    ///
    /// Returns an error when the OTP is wrong or expired.
    #[instrument(skip(self, otp))]
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<String, ApiError> {
        self.post_query(
            "/user/verify-otp",
            &[("email", email.to_string()), ("otp", otp.to_string())],
        )
        .await
    }

    /// Ask the backend to send a fresh OTP.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn resend_otp(&self, email: &str) -> Result<String, ApiError> {
        self.post_query("/user/resend-otp", &[("email", email.to_string())])
            .await
    }

    /// Verify an email address from the token in the verification link.
    ///
    /// # Errors
    ///
    /// Returns an error when the token is invalid or expired.
    #[instrument(skip(self, token))]
    pub async fn verify_email(&self, token: &str) -> Result<String, ApiError> {
        self.get("/user/verify", &[("token", token.to_string())])
            .await
    }

    /// Update the display name on a profile.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn update_profile(&self, email: &str, name: &str) -> Result<UserDto, ApiError> {
        self.put::<(), UserDto>(
            "/user/update-profile",
            &[("email", email.to_string()), ("name", name.to_string())],
            None,
        )
        .await
    }

    /// Change the account password.
    ///
    /// # Errors
    ///
    /// Returns an error when the old password is wrong or the call fails.
    #[instrument(skip(self, old_password, new_password))]
    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<String, ApiError> {
        self.put::<(), String>(
            "/user/change-password",
            &[
                ("email", email.to_string()),
                ("oldPwd", old_password.to_string()),
                ("newPwd", new_password.to_string()),
            ],
            None,
        )
        .await
    }

    /// Tell the backend the user logged out (best effort).
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails; callers log and
    /// clear the session regardless.
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: UserId) -> Result<String, ApiError> {
        self.post_query("/user/logout", &[("userId", user_id.to_string())])
            .await
    }
}
