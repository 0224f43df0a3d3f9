//! Account port
//!
//! Everything the flows need from the authentication backend: signing in,
//! looking up an email, creating accounts and resetting passwords.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::flow::{LoginOutcome, RegistrationFormData, RegistrationOutcome, UserStatusSummary};
use crate::password_reset::ResetPasswordRequest;

#[async_trait]
pub trait AccountPort: Send + Sync {
    /// Sign in an existing user and register them for `event_code`.
    async fn login_and_join_event(
        &self,
        email: &str,
        password: &str,
        event_code: &str,
    ) -> Result<LoginOutcome, ApiError>;

    /// Look up whether an account exists for `email`, optionally scoped to an event.
    async fn check_user_status(
        &self,
        email: &str,
        event_code: Option<&str>,
    ) -> Result<UserStatusSummary, ApiError>;

    /// Create an account bound to an event. The backend sends its own
    /// verification email.
    async fn register_with_event(
        &self,
        form: &RegistrationFormData,
        event_code: &str,
    ) -> Result<RegistrationOutcome, ApiError>;

    /// Create an account backed by a verified one-time code.
    async fn register_with_otp(
        &self,
        form: &RegistrationFormData,
        otp_id: &str,
    ) -> Result<RegistrationOutcome, ApiError>;

    /// Set a new password; returns the backend's confirmation message.
    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<String, ApiError>;
}
