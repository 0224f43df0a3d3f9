//! Data carried by the signup flow.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feedback::Feedback;
use crate::flow::step::{Progress, Step, StepTicket};

/// Event metadata returned by a successful event-code validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub event_id: String,
    pub event_code: String,
    pub event_name: String,
    pub event_description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_upcoming: bool,
}

/// What the flow knows about the account, for the confirmation page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatusSummary {
    pub user_exists: bool,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub user_status: Option<String>,
    pub event_name: Option<String>,
    pub event_code: Option<String>,
    pub registration_id: Option<String>,
    pub registered_at: Option<DateTime<Utc>>,
}

impl UserStatusSummary {
    pub fn from_account(account: &AccountSummary, registration: Option<&EventRegistration>) -> Self {
        Self {
            user_exists: true,
            user_id: account.user_id.clone(),
            user_email: account.email.clone(),
            user_name: account.username.clone(),
            user_status: account.status.clone(),
            event_name: registration.map(|r| r.event_name.clone()),
            event_code: registration.map(|r| r.event_code.clone()),
            registration_id: registration.and_then(|r| r.registration_id.clone()),
            registered_at: registration.and_then(|r| r.registered_at),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRegistration {
    pub event_name: String,
    pub event_code: String,
    pub registration_id: Option<String>,
    pub registered_at: Option<DateTime<Utc>>,
}

/// Result of logging in and joining the selected event in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub tokens: AuthTokens,
    pub account: AccountSummary,
    pub event_registration: Option<EventRegistration>,
}

/// Result of creating an account, with or without an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub account: AccountSummary,
    pub event_registration: Option<EventRegistration>,
}

/// Profile fields collected across the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Email,
    Username,
    FirstName,
    LastName,
    Password,
    PasswordConfirm,
    Institution,
    Department,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Email,
        FormField::Username,
        FormField::FirstName,
        FormField::LastName,
        FormField::Password,
        FormField::PasswordConfirm,
        FormField::Institution,
        FormField::Department,
    ];

    /// Backend field name, also the key of inline field errors.
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Email => "email",
            FormField::Username => "username",
            FormField::FirstName => "first_name",
            FormField::LastName => "last_name",
            FormField::Password => "password",
            FormField::PasswordConfirm => "password_confirm",
            FormField::Institution => "institution",
            FormField::Department => "department",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, FormField::Password | FormField::PasswordConfirm)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationFormData {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirm: String,
    pub institution: Option<String>,
    pub department: Option<String>,
}

impl RegistrationFormData {
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Email => self.email = value,
            FormField::Username => self.username = value,
            FormField::FirstName => self.first_name = value,
            FormField::LastName => self.last_name = value,
            FormField::Password => self.password = value,
            FormField::PasswordConfirm => self.password_confirm = value,
            FormField::Institution => self.institution = Some(value),
            FormField::Department => self.department = Some(value),
        }
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Email => Some(&self.email),
            FormField::Username => Some(&self.username),
            FormField::FirstName => Some(&self.first_name),
            FormField::LastName => Some(&self.last_name),
            FormField::Password => Some(&self.password),
            FormField::PasswordConfirm => Some(&self.password_confirm),
            FormField::Institution => self.institution.as_deref(),
            FormField::Department => self.department.as_deref(),
        }
    }
}

impl fmt::Debug for RegistrationFormData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationFormData")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"[REDACTED]")
            .field("password_confirm", &"[REDACTED]")
            .field("institution", &self.institution)
            .field("department", &self.department)
            .finish()
    }
}

/// Complete state of one signup flow.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowState {
    pub current_step: Step,
    /// Bumped on every step change.
    pub visit: u64,
    pub selected_event: Option<EventSummary>,
    pub user_status: Option<UserStatusSummary>,
    pub verified_otp_id: Option<String>,
    pub form_data: RegistrationFormData,
    pub is_loading: bool,
    pub session: Option<AuthTokens>,
    /// Earliest instant a new code may be requested from `OtpVerify`.
    pub otp_resend_available_at: Option<DateTime<Utc>>,
    pub feedback: Feedback,
}

impl Default for FlowState {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowState {
    pub fn new() -> Self {
        Self {
            current_step: Step::EventCode,
            visit: 0,
            selected_event: None,
            user_status: None,
            verified_otp_id: None,
            form_data: RegistrationFormData::default(),
            is_loading: false,
            session: None,
            otp_resend_available_at: None,
            feedback: Feedback::default(),
        }
    }

    pub fn ticket(&self) -> StepTicket {
        StepTicket {
            step: self.current_step,
            visit: self.visit,
        }
    }

    pub fn progress(&self) -> Progress {
        self.current_step.progress()
    }

    /// A registration must be backed by either an event code or a verified OTP.
    pub fn can_submit_registration(&self) -> bool {
        self.selected_event.is_some() || self.verified_otp_id.is_some()
    }

    /// Seconds left before a new code may be requested.
    pub fn resend_remaining_secs(&self, now: DateTime<Utc>) -> i64 {
        self.otp_resend_available_at
            .map(|at| (at - now).num_seconds().max(0))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn form_data_debug_redacts_passwords() {
        let mut form = RegistrationFormData::default();
        form.set(FormField::Password, "hunter22".into());
        form.set(FormField::PasswordConfirm, "hunter22".into());

        let rendered = format!("{form:?}");
        assert!(!rendered.contains("hunter22"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn optional_fields_read_back_after_set() {
        let mut form = RegistrationFormData::default();
        assert_eq!(form.get(FormField::Institution), None);

        form.set(FormField::Institution, "CRDF Academy".into());
        assert_eq!(form.get(FormField::Institution), Some("CRDF Academy"));
    }

    #[test]
    fn resend_remaining_counts_down_to_zero() {
        let now = Utc::now();
        let mut state = FlowState::new();
        assert_eq!(state.resend_remaining_secs(now), 0);

        state.otp_resend_available_at = Some(now + Duration::seconds(30));
        assert_eq!(state.resend_remaining_secs(now), 30);
        assert_eq!(state.resend_remaining_secs(now + Duration::seconds(45)), 0);
    }
}
