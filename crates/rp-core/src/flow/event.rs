use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::flow::model::{
    EventSummary, FormField, LoginOutcome, RegistrationOutcome, UserStatusSummary,
};
use crate::flow::step::StepTicket;

/// Events that drive the signup flow.
///
/// User intents come from the page shell; results come back from the
/// orchestrator after it executed a [`crate::flow::FlowAction`].
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    // Field edits
    InputChanged { field: FormField, value: String },
    DismissFeedback,

    // Navigation
    Back,
    SkipEventCode,
    ChooseCreateAccount,

    // Submissions
    SubmitEventCode { code: String },
    SubmitLogin,
    SubmitUserCheck,
    SendOtp,
    ResendOtp { now: DateTime<Utc> },
    SubmitOtp { code: String },
    SubmitRegistration,

    // Results (from orchestrator)
    EventCodeValidated {
        ticket: StepTicket,
        result: Result<EventSummary, ApiError>,
    },
    LoginCompleted {
        ticket: StepTicket,
        result: Result<LoginOutcome, ApiError>,
    },
    UserStatusChecked {
        ticket: StepTicket,
        result: Result<UserStatusSummary, ApiError>,
    },
    OtpSent {
        ticket: StepTicket,
        resend_available_at: DateTime<Utc>,
        result: Result<String, ApiError>,
    },
    OtpVerified {
        ticket: StepTicket,
        result: Result<String, ApiError>,
    },
    Registered {
        ticket: StepTicket,
        result: Result<RegistrationOutcome, ApiError>,
    },
}

impl FlowEvent {
    /// Name for logs; event payloads may hold secrets.
    pub fn name(&self) -> &'static str {
        match self {
            FlowEvent::InputChanged { .. } => "InputChanged",
            FlowEvent::DismissFeedback => "DismissFeedback",
            FlowEvent::Back => "Back",
            FlowEvent::SkipEventCode => "SkipEventCode",
            FlowEvent::ChooseCreateAccount => "ChooseCreateAccount",
            FlowEvent::SubmitEventCode { .. } => "SubmitEventCode",
            FlowEvent::SubmitLogin => "SubmitLogin",
            FlowEvent::SubmitUserCheck => "SubmitUserCheck",
            FlowEvent::SendOtp => "SendOtp",
            FlowEvent::ResendOtp { .. } => "ResendOtp",
            FlowEvent::SubmitOtp { .. } => "SubmitOtp",
            FlowEvent::SubmitRegistration => "SubmitRegistration",
            FlowEvent::EventCodeValidated { .. } => "EventCodeValidated",
            FlowEvent::LoginCompleted { .. } => "LoginCompleted",
            FlowEvent::UserStatusChecked { .. } => "UserStatusChecked",
            FlowEvent::OtpSent { .. } => "OtpSent",
            FlowEvent::OtpVerified { .. } => "OtpVerified",
            FlowEvent::Registered { .. } => "Registered",
        }
    }

    /// Intents that start a backend call; refused while one is in flight.
    pub fn is_submission(&self) -> bool {
        matches!(
            self,
            FlowEvent::SubmitEventCode { .. }
                | FlowEvent::SubmitLogin
                | FlowEvent::SubmitUserCheck
                | FlowEvent::SendOtp
                | FlowEvent::ResendOtp { .. }
                | FlowEvent::SubmitOtp { .. }
                | FlowEvent::SubmitRegistration
        )
    }

    /// Ticket of a result event.
    pub fn ticket(&self) -> Option<StepTicket> {
        match self {
            FlowEvent::EventCodeValidated { ticket, .. }
            | FlowEvent::LoginCompleted { ticket, .. }
            | FlowEvent::UserStatusChecked { ticket, .. }
            | FlowEvent::OtpSent { ticket, .. }
            | FlowEvent::OtpVerified { ticket, .. }
            | FlowEvent::Registered { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }
}
