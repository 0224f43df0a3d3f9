use crate::error::ApiError;
use crate::feedback::{classify, Feedback, Toast};
use crate::flow::messages::{OTP_SENT, SEND_OTP_FALLBACK};
use crate::flow::validation;
use crate::password_reset::model::{
    ResetAction, ResetEvent, ResetField, ResetPasswordRequest, ResetState, ResetStep,
};

pub const RESET_FALLBACK: &str = "Failed to reset password.";
pub const RESET_SUCCEEDED: &str = "Your password has been reset. You can now sign in.";
const RESET_CODE_INVALID: &str = "Enter the 6-digit code from your email.";

/// Pure password-reset state machine.
pub struct PasswordResetStateMachine;

impl PasswordResetStateMachine {
    pub fn transition(mut state: ResetState, event: ResetEvent) -> (ResetState, Vec<ResetAction>) {
        if state.current_step == ResetStep::Done {
            return (state, Vec::new());
        }

        if let Some(ticket) = event.ticket() {
            if ticket != state.ticket() {
                #[cfg(feature = "tracing")]
                tracing::debug!(event = event.name(), current = %state.current_step, "discarding stale result");
                return (state, Vec::new());
            }
        }

        if event.is_submission() && state.is_loading {
            return (state, Vec::new());
        }

        match (state.current_step, event) {
            (_, ResetEvent::InputChanged { field, value }) => {
                state.set(field, value);
                state.feedback.clear();
                (state, Vec::new())
            }
            (_, ResetEvent::DismissFeedback) => {
                state.feedback.clear();
                (state, Vec::new())
            }
            (ResetStep::Reset, ResetEvent::Back) => {
                state.otp_code.clear();
                (Self::enter(state, ResetStep::RequestCode), Vec::new())
            }
            (ResetStep::RequestCode, ResetEvent::RequestCode) => {
                let errors = validation::validate_email(&state.email);
                if !errors.is_empty() {
                    state.feedback = Feedback::fields(errors);
                    return (state, Vec::new());
                }
                let email = state.email.trim().to_string();
                state.is_loading = true;
                state.feedback.clear();
                let ticket = state.ticket();
                (state, vec![ResetAction::SendCode { ticket, email }])
            }
            (ResetStep::RequestCode, ResetEvent::CodeSent { result, .. }) => match result {
                Ok(message) => {
                    let mut state = Self::enter(state, ResetStep::Reset);
                    let message = if message.trim().is_empty() {
                        OTP_SENT.to_string()
                    } else {
                        message
                    };
                    state.feedback = Feedback::toast(Toast::success(message));
                    (state, Vec::new())
                }
                Err(err) => (Self::fail(state, &err, SEND_OTP_FALLBACK), Vec::new()),
            },
            (ResetStep::Reset, ResetEvent::SubmitReset) => {
                let otp_code = state.otp_code.trim().to_string();
                let mut errors = validation::validate_new_password(
                    &state.new_password,
                    &state.confirm_password,
                    ResetField::NewPassword.as_str(),
                    ResetField::ConfirmPassword.as_str(),
                );
                if !validation::is_valid_otp_code(&otp_code) {
                    errors.insert(
                        ResetField::OtpCode.as_str().to_string(),
                        RESET_CODE_INVALID.to_string(),
                    );
                }
                if !errors.is_empty() {
                    state.feedback = Feedback::fields(errors);
                    return (state, Vec::new());
                }
                let request = ResetPasswordRequest {
                    email: state.email.trim().to_string(),
                    otp_code,
                    new_password: state.new_password.clone(),
                    confirm_password: state.confirm_password.clone(),
                };
                state.is_loading = true;
                state.feedback.clear();
                let ticket = state.ticket();
                (state, vec![ResetAction::ResetPassword { ticket, request }])
            }
            (ResetStep::Reset, ResetEvent::PasswordReset { result, .. }) => match result {
                Ok(message) => {
                    let mut state = Self::enter(state, ResetStep::Done);
                    state.new_password.clear();
                    state.confirm_password.clear();
                    let message = if message.trim().is_empty() {
                        RESET_SUCCEEDED.to_string()
                    } else {
                        message
                    };
                    state.feedback = Feedback::toast(Toast::success(message));
                    (state, Vec::new())
                }
                Err(err) => (Self::fail(state, &err, RESET_FALLBACK), Vec::new()),
            },
            _ => (state, Vec::new()),
        }
    }

    fn enter(mut state: ResetState, step: ResetStep) -> ResetState {
        state.current_step = step;
        state.visit += 1;
        state.is_loading = false;
        state.feedback.clear();
        state
    }

    fn fail(mut state: ResetState, err: &ApiError, fallback: &str) -> ResetState {
        state.is_loading = false;
        state.feedback = classify(err, fallback);
        state
    }
}
