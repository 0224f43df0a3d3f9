use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::feedback::Feedback;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResetStep {
    RequestCode,
    Reset,
    Done,
}

impl ResetStep {
    pub fn as_str(self) -> &'static str {
        match self {
            ResetStep::RequestCode => "request-code",
            ResetStep::Reset => "reset",
            ResetStep::Done => "done",
        }
    }
}

impl fmt::Display for ResetStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResetTicket {
    pub step: ResetStep,
    pub visit: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResetField {
    Email,
    OtpCode,
    NewPassword,
    ConfirmPassword,
}

impl ResetField {
    pub fn as_str(self) -> &'static str {
        match self {
            ResetField::Email => "email",
            ResetField::OtpCode => "otp_code",
            ResetField::NewPassword => "new_password",
            ResetField::ConfirmPassword => "confirm_password",
        }
    }
}

/// Body of the reset call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp_code: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl fmt::Debug for ResetPasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetPasswordRequest")
            .field("email", &self.email)
            .field("otp_code", &self.otp_code)
            .field("new_password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, PartialEq)]
pub struct ResetState {
    pub current_step: ResetStep,
    pub visit: u64,
    pub email: String,
    pub otp_code: String,
    pub new_password: String,
    pub confirm_password: String,
    pub is_loading: bool,
    pub feedback: Feedback,
}

impl Default for ResetState {
    fn default() -> Self {
        Self::new()
    }
}

impl ResetState {
    pub fn new() -> Self {
        Self {
            current_step: ResetStep::RequestCode,
            visit: 0,
            email: String::new(),
            otp_code: String::new(),
            new_password: String::new(),
            confirm_password: String::new(),
            is_loading: false,
            feedback: Feedback::default(),
        }
    }

    pub fn ticket(&self) -> ResetTicket {
        ResetTicket {
            step: self.current_step,
            visit: self.visit,
        }
    }

    pub(crate) fn set(&mut self, field: ResetField, value: String) {
        match field {
            ResetField::Email => self.email = value,
            ResetField::OtpCode => self.otp_code = value,
            ResetField::NewPassword => self.new_password = value,
            ResetField::ConfirmPassword => self.confirm_password = value,
        }
    }
}

impl fmt::Debug for ResetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetState")
            .field("current_step", &self.current_step)
            .field("visit", &self.visit)
            .field("email", &self.email)
            .field("new_password", &"[REDACTED]")
            .field("is_loading", &self.is_loading)
            .field("feedback", &self.feedback)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResetEvent {
    InputChanged { field: ResetField, value: String },
    DismissFeedback,
    Back,
    RequestCode,
    SubmitReset,
    CodeSent {
        ticket: ResetTicket,
        result: Result<String, ApiError>,
    },
    PasswordReset {
        ticket: ResetTicket,
        result: Result<String, ApiError>,
    },
}

impl ResetEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ResetEvent::InputChanged { .. } => "InputChanged",
            ResetEvent::DismissFeedback => "DismissFeedback",
            ResetEvent::Back => "Back",
            ResetEvent::RequestCode => "RequestCode",
            ResetEvent::SubmitReset => "SubmitReset",
            ResetEvent::CodeSent { .. } => "CodeSent",
            ResetEvent::PasswordReset { .. } => "PasswordReset",
        }
    }

    pub fn ticket(&self) -> Option<ResetTicket> {
        match self {
            ResetEvent::CodeSent { ticket, .. } | ResetEvent::PasswordReset { ticket, .. } => {
                Some(*ticket)
            }
            _ => None,
        }
    }

    pub fn is_submission(&self) -> bool {
        matches!(self, ResetEvent::RequestCode | ResetEvent::SubmitReset)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetAction {
    SendCode {
        ticket: ResetTicket,
        email: String,
    },
    ResetPassword {
        ticket: ResetTicket,
        request: ResetPasswordRequest,
    },
}

impl ResetAction {
    pub fn name(&self) -> &'static str {
        match self {
            ResetAction::SendCode { .. } => "SendCode",
            ResetAction::ResetPassword { .. } => "ResetPassword",
        }
    }
}
