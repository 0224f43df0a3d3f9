use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use rp_core::flow::{
    AccountSummary, AuthTokens, LoginOutcome, RegistrationFormData, RegistrationOutcome,
    UserStatusSummary,
};
use rp_core::password_reset::ResetPasswordRequest;
use rp_core::ports::AccountPort;
use rp_core::ApiError;

use crate::http::dto::{opt_id_string, Envelope, EventRegistrationDto, UserDto};
use crate::http::error_body;
use crate::http::ApiClient;

const LOGIN_WITH_EVENT: &str = "/api/auth/login-with-event/";
const CHECK_USER_STATUS: &str = "/api/auth/check-user-status/";
const REGISTER_WITH_EVENT: &str = "/api/auth/register-with-event/";
const REGISTER: &str = "/api/auth/register/";
const RESET_PASSWORD: &str = "/api/auth/reset-password/";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    event_code: &'a str,
}

#[derive(Deserialize)]
struct TokensDto {
    access: String,
    refresh: String,
}

#[derive(Deserialize)]
struct LoginData {
    tokens: TokensDto,
    user: UserDto,
    #[serde(default)]
    event_registration: Option<EventRegistrationDto>,
}

#[derive(Serialize)]
struct UserStatusRequest<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_code: Option<&'a str>,
}

#[derive(Deserialize)]
struct UserStatusData {
    #[serde(default)]
    user_exists: bool,
    #[serde(default, deserialize_with = "opt_id_string")]
    user_id: Option<String>,
    #[serde(default, alias = "email")]
    user_email: Option<String>,
    #[serde(default, alias = "username")]
    user_name: Option<String>,
    #[serde(default)]
    user_status: Option<String>,
    #[serde(default)]
    event_registration: Option<EventRegistrationDto>,
}

#[derive(Serialize)]
struct RegisterWithEventRequest<'a> {
    #[serde(flatten)]
    form: &'a RegistrationFormData,
    event_code: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    #[serde(flatten)]
    form: &'a RegistrationFormData,
    otp_id: &'a str,
}

#[derive(Deserialize)]
struct RegisteredData {
    #[serde(flatten)]
    user: UserDto,
    #[serde(default)]
    event_registration: Option<EventRegistrationDto>,
}

impl From<RegisteredData> for RegistrationOutcome {
    fn from(data: RegisteredData) -> Self {
        RegistrationOutcome {
            account: AccountSummary::from(data.user),
            event_registration: data.event_registration.map(Into::into),
        }
    }
}

#[async_trait]
impl AccountPort for ApiClient {
    async fn login_and_join_event(
        &self,
        email: &str,
        password: &str,
        event_code: &str,
    ) -> Result<LoginOutcome, ApiError> {
        // Only login distinguishes an account that has not verified its email.
        let envelope: Envelope = self
            .post_json_with(
                LOGIN_WITH_EVENT,
                &LoginRequest {
                    email,
                    password,
                    event_code,
                },
                error_body::login_from_value,
            )
            .await?;
        let data: LoginData = envelope
            .ensure_success_with("Login failed", error_body::login_from_value)?
            .data(LOGIN_WITH_EVENT)?;

        self.set_access_token(Some(data.tokens.access.clone())).await;

        Ok(LoginOutcome {
            tokens: AuthTokens {
                access: data.tokens.access,
                refresh: data.tokens.refresh,
            },
            account: data.user.into(),
            event_registration: data.event_registration.map(Into::into),
        })
    }

    async fn check_user_status(
        &self,
        email: &str,
        event_code: Option<&str>,
    ) -> Result<UserStatusSummary, ApiError> {
        let envelope: Envelope = self
            .post_json(CHECK_USER_STATUS, &UserStatusRequest { email, event_code })
            .await?;
        let data: UserStatusData = envelope
            .ensure_success("Failed to check user status")?
            .data(CHECK_USER_STATUS)?;

        let registration = data.event_registration;
        Ok(UserStatusSummary {
            user_exists: data.user_exists,
            user_id: data.user_id,
            user_email: data.user_email,
            user_name: data.user_name,
            user_status: data.user_status,
            event_name: registration.as_ref().map(|r| r.event_name.clone()),
            event_code: registration.as_ref().map(|r| r.event_code.clone()),
            registration_id: registration.as_ref().and_then(|r| r.registration_id.clone()),
            registered_at: registration.and_then(|r| r.registered_at),
        })
    }

    async fn register_with_event(
        &self,
        form: &RegistrationFormData,
        event_code: &str,
    ) -> Result<RegistrationOutcome, ApiError> {
        let envelope: Envelope = self
            .post_json(REGISTER_WITH_EVENT, &RegisterWithEventRequest { form, event_code })
            .await?;
        let data: RegisteredData = envelope
            .ensure_success("Registration failed")?
            .data(REGISTER_WITH_EVENT)?;
        Ok(data.into())
    }

    async fn register_with_otp(
        &self,
        form: &RegistrationFormData,
        otp_id: &str,
    ) -> Result<RegistrationOutcome, ApiError> {
        let envelope: Envelope = self
            .post_json(REGISTER, &RegisterRequest { form, otp_id })
            .await?;
        let envelope = envelope.ensure_success("Registration failed")?;

        // Returns the created user itself, optionally wrapped in `data`.
        let body = match envelope.data {
            Some(data @ Value::Object(_)) => data,
            _ => Value::Object(envelope.rest),
        };
        let data: RegisteredData = serde_json::from_value(body)
            .map_err(|err| ApiError::Unknown(format!("{REGISTER}: unexpected response: {err}")))?;
        Ok(data.into())
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<String, ApiError> {
        let envelope: Envelope = self.post_json(RESET_PASSWORD, request).await?;
        let envelope = envelope.ensure_success("Failed to reset password.")?;
        Ok(envelope.message.unwrap_or_default())
    }
}
