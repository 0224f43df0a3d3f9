use crate::flow::model::RegistrationFormData;
use crate::flow::step::StepTicket;

/// Backend calls requested by a transition.
///
/// The orchestrator executes each one and answers with the matching result
/// event carrying the same ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowAction {
    ValidateEventCode {
        ticket: StepTicket,
        code: String,
    },
    LoginAndJoinEvent {
        ticket: StepTicket,
        email: String,
        password: String,
        event_code: String,
    },
    CheckUserStatus {
        ticket: StepTicket,
        email: String,
        event_code: Option<String>,
    },
    SendOtp {
        ticket: StepTicket,
        email: String,
    },
    VerifyOtp {
        ticket: StepTicket,
        email: String,
        code: String,
    },
    /// Event-bound signup: account plus event registration, no OTP.
    RegisterWithEvent {
        ticket: StepTicket,
        form: RegistrationFormData,
        event_code: String,
    },
    RegisterWithOtp {
        ticket: StepTicket,
        form: RegistrationFormData,
        otp_id: String,
    },
}

impl FlowAction {
    pub fn name(&self) -> &'static str {
        match self {
            FlowAction::ValidateEventCode { .. } => "ValidateEventCode",
            FlowAction::LoginAndJoinEvent { .. } => "LoginAndJoinEvent",
            FlowAction::CheckUserStatus { .. } => "CheckUserStatus",
            FlowAction::SendOtp { .. } => "SendOtp",
            FlowAction::VerifyOtp { .. } => "VerifyOtp",
            FlowAction::RegisterWithEvent { .. } => "RegisterWithEvent",
            FlowAction::RegisterWithOtp { .. } => "RegisterWithOtp",
        }
    }

    pub fn ticket(&self) -> StepTicket {
        match self {
            FlowAction::ValidateEventCode { ticket, .. }
            | FlowAction::LoginAndJoinEvent { ticket, .. }
            | FlowAction::CheckUserStatus { ticket, .. }
            | FlowAction::SendOtp { ticket, .. }
            | FlowAction::VerifyOtp { ticket, .. }
            | FlowAction::RegisterWithEvent { ticket, .. }
            | FlowAction::RegisterWithOtp { ticket, .. } => *ticket,
        }
    }
}
