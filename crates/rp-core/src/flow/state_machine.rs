//! Signup flow state machine.
//!
//! Defines a pure state transition function for the signup flow. Backend calls
//! are returned as [`FlowAction`]s and their outcomes come back as result
//! events; nothing here performs I/O.

use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::feedback::{classify, Feedback, Toast};
use crate::flow::action::FlowAction;
use crate::flow::event::FlowEvent;
use crate::flow::messages;
use crate::flow::model::{FlowState, RegistrationOutcome, UserStatusSummary};
use crate::flow::step::{Step, StepTicket};
use crate::flow::validation;

/// Pure signup state machine.
pub struct FlowStateMachine;

impl FlowStateMachine {
    pub fn transition(mut state: FlowState, event: FlowEvent) -> (FlowState, Vec<FlowAction>) {
        if state.current_step.is_terminal() {
            return (state, Vec::new());
        }

        if let Some(ticket) = event.ticket() {
            if ticket != state.ticket() {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    event = event.name(),
                    dispatched_from = %ticket.step,
                    current = %state.current_step,
                    "discarding stale result"
                );
                return (state, Vec::new());
            }
        }

        if event.is_submission() && state.is_loading {
            return (state, Vec::new());
        }

        match (state.current_step, event) {
            (_, FlowEvent::InputChanged { field, value }) => {
                state.form_data.set(field, value);
                state.feedback.clear();
                (state, Vec::new())
            }
            (_, FlowEvent::DismissFeedback) => {
                state.feedback.clear();
                (state, Vec::new())
            }
            (_, FlowEvent::Back) => (Self::back(state), Vec::new()),

            // event-code
            (Step::EventCode, FlowEvent::SubmitEventCode { code }) => {
                let code = code.trim().to_string();
                if code.is_empty() {
                    state.feedback = Feedback::toast(Toast::error(messages::EVENT_CODE_REQUIRED));
                    return (state, Vec::new());
                }
                Self::begin(state, |ticket| FlowAction::ValidateEventCode { ticket, code })
            }
            (Step::EventCode, FlowEvent::SkipEventCode) => {
                state.selected_event = None;
                (Self::enter(state, Step::UserCheck), Vec::new())
            }
            (Step::EventCode, FlowEvent::EventCodeValidated { result, .. }) => match result {
                Ok(event) => {
                    state.selected_event = Some(event);
                    (Self::enter(state, Step::LoginSignup), Vec::new())
                }
                Err(err) => (Self::fail(state, &err, messages::EVENT_CODE_FALLBACK), Vec::new()),
            },

            // login-signup
            (Step::LoginSignup, FlowEvent::SubmitLogin) => {
                let Some(event_code) = state.selected_event.as_ref().map(|e| e.event_code.clone())
                else {
                    state.feedback = Feedback::toast(Toast::error(messages::NO_EVENT_SELECTED));
                    return (state, Vec::new());
                };
                let email = state.form_data.email.trim().to_string();
                let password = state.form_data.password.clone();
                if email.is_empty() || password.is_empty() {
                    state.feedback =
                        Feedback::toast(Toast::error(messages::LOGIN_FIELDS_REQUIRED));
                    return (state, Vec::new());
                }
                Self::begin(state, |ticket| FlowAction::LoginAndJoinEvent {
                    ticket,
                    email,
                    password,
                    event_code,
                })
            }
            (Step::LoginSignup, FlowEvent::ChooseCreateAccount) => {
                (Self::enter(state, Step::UserCheck), Vec::new())
            }
            (Step::LoginSignup, FlowEvent::LoginCompleted { result, .. }) => match result {
                Ok(outcome) => {
                    state.session = Some(outcome.tokens);
                    state.user_status = Some(UserStatusSummary::from_account(
                        &outcome.account,
                        outcome.event_registration.as_ref(),
                    ));
                    let mut state = Self::enter(state, Step::Complete);
                    state.feedback = Feedback::toast(Toast::success(messages::LOGIN_SUCCEEDED));
                    (state, Vec::new())
                }
                Err(err) => (Self::fail(state, &err, messages::LOGIN_FALLBACK), Vec::new()),
            },

            // user-check
            (Step::UserCheck, FlowEvent::SubmitUserCheck) => {
                let errors = validation::validate_email(&state.form_data.email);
                if !errors.is_empty() {
                    state.feedback = Feedback::fields(errors);
                    return (state, Vec::new());
                }
                let email = state.form_data.email.trim().to_string();
                let event_code = state.selected_event.as_ref().map(|e| e.event_code.clone());
                Self::begin(state, |ticket| FlowAction::CheckUserStatus {
                    ticket,
                    email,
                    event_code,
                })
            }
            (Step::UserCheck, FlowEvent::UserStatusChecked { result, .. }) => match result {
                Ok(status) => match (state.selected_event.is_some(), status.user_exists) {
                    (true, true) => {
                        state.user_status = Some(status);
                        let mut state = Self::enter(state, Step::Complete);
                        state.feedback =
                            Feedback::toast(Toast::info(messages::ALREADY_REGISTERED_EVENT));
                        (state, Vec::new())
                    }
                    // Event-bound signup skips OTP: the event registration endpoint
                    // sends its own verification email.
                    (true, false) => (Self::enter(state, Step::Registration), Vec::new()),
                    (false, _) => (Self::enter(state, Step::OtpSend), Vec::new()),
                },
                Err(err) => (Self::fail(state, &err, messages::USER_CHECK_FALLBACK), Vec::new()),
            },

            // otp-send / otp-verify
            (Step::OtpSend, FlowEvent::SendOtp) => Self::request_otp(state),
            (Step::OtpVerify, FlowEvent::ResendOtp { now }) => {
                let remaining = state.resend_remaining_secs(now);
                if remaining > 0 {
                    state.feedback = Feedback::toast(Toast::info(messages::resend_wait(remaining)));
                    return (state, Vec::new());
                }
                Self::request_otp(state)
            }
            (
                Step::OtpSend | Step::OtpVerify,
                FlowEvent::OtpSent {
                    result,
                    resend_available_at,
                    ..
                },
            ) => match result {
                Ok(message) => {
                    state.otp_resend_available_at = Some(resend_available_at);
                    let mut state = if state.current_step == Step::OtpSend {
                        Self::enter(state, Step::OtpVerify)
                    } else {
                        state.is_loading = false;
                        state.feedback.clear();
                        state
                    };
                    let message = if message.trim().is_empty() {
                        messages::OTP_SENT.to_string()
                    } else {
                        message
                    };
                    state.feedback.toasts.push(Toast::success(message));
                    (state, Vec::new())
                }
                Err(err) => (Self::fail(state, &err, messages::SEND_OTP_FALLBACK), Vec::new()),
            },
            (Step::OtpVerify, FlowEvent::SubmitOtp { code }) => {
                let code = code.trim().to_string();
                if !validation::is_valid_otp_code(&code) {
                    state.feedback = Feedback::toast(Toast::error(messages::OTP_CODE_INVALID));
                    return (state, Vec::new());
                }
                let email = state.form_data.email.trim().to_string();
                Self::begin(state, |ticket| FlowAction::VerifyOtp { ticket, email, code })
            }
            (Step::OtpVerify, FlowEvent::OtpVerified { result, .. }) => match result {
                Ok(otp_id) => {
                    state.verified_otp_id = Some(otp_id);
                    (Self::enter(state, Step::Registration), Vec::new())
                }
                Err(err) => (Self::fail(state, &err, messages::VERIFY_OTP_FALLBACK), Vec::new()),
            },

            // registration
            (Step::Registration, FlowEvent::SubmitRegistration) => {
                let errors = validation::validate_registration(&state.form_data);
                if !errors.is_empty() {
                    state.feedback = Feedback::fields(errors);
                    return (state, Vec::new());
                }
                let form = state.form_data.clone();
                if let Some(event_code) = state.selected_event.as_ref().map(|e| e.event_code.clone())
                {
                    Self::begin(state, |ticket| FlowAction::RegisterWithEvent {
                        ticket,
                        form,
                        event_code,
                    })
                } else if let Some(otp_id) = state.verified_otp_id.clone() {
                    Self::begin(state, |ticket| FlowAction::RegisterWithOtp {
                        ticket,
                        form,
                        otp_id,
                    })
                } else {
                    state.feedback = Feedback::toast(Toast::error(messages::VERIFICATION_REQUIRED));
                    (state, Vec::new())
                }
            }
            (Step::Registration, FlowEvent::Registered { result, .. }) => match result {
                Ok(outcome) => (Self::complete_registration(state, outcome), Vec::new()),
                Err(err) => (Self::fail(state, &err, messages::REGISTRATION_FALLBACK), Vec::new()),
            },

            #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
            (step, event) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(step = %step, event = event.name(), "event ignored");
                (state, Vec::new())
            }
        }
    }

    fn back(mut state: FlowState) -> FlowState {
        let target = match state.current_step {
            Step::EventCode | Step::Complete => return state,
            Step::LoginSignup | Step::UserCheck => Step::EventCode,
            Step::OtpSend => Step::UserCheck,
            Step::OtpVerify => Step::OtpSend,
            Step::Registration if state.selected_event.is_some() => Step::UserCheck,
            Step::Registration => Step::OtpSend,
        };

        match target {
            Step::EventCode => {
                state.selected_event = None;
                state.user_status = None;
                state.verified_otp_id = None;
            }
            Step::UserCheck | Step::OtpSend => state.verified_otp_id = None,
            _ => {}
        }

        Self::enter(state, target)
    }

    /// Move to `step`: new visit, nothing in flight, feedback cleared.
    fn enter(mut state: FlowState, step: Step) -> FlowState {
        state.current_step = step;
        state.visit += 1;
        state.is_loading = false;
        state.feedback.clear();
        state
    }

    fn begin(
        mut state: FlowState,
        action: impl FnOnce(StepTicket) -> FlowAction,
    ) -> (FlowState, Vec<FlowAction>) {
        state.is_loading = true;
        state.feedback.clear();
        let action = action(state.ticket());
        (state, vec![action])
    }

    fn fail(mut state: FlowState, err: &ApiError, fallback: &str) -> FlowState {
        state.is_loading = false;
        state.feedback = classify(err, fallback);
        state
    }

    fn request_otp(mut state: FlowState) -> (FlowState, Vec<FlowAction>) {
        let errors = validation::validate_email(&state.form_data.email);
        if !errors.is_empty() {
            state.feedback = Feedback::fields(errors);
            return (state, Vec::new());
        }
        let email = state.form_data.email.trim().to_string();
        Self::begin(state, |ticket| FlowAction::SendOtp { ticket, email })
    }

    fn complete_registration(mut state: FlowState, outcome: RegistrationOutcome) -> FlowState {
        let mut summary =
            UserStatusSummary::from_account(&outcome.account, outcome.event_registration.as_ref());
        let mut toasts = vec![Toast::success(messages::REGISTRATION_SUCCEEDED)];

        if let Some(event) = &state.selected_event {
            match &outcome.event_registration {
                Some(registration) if registration.event_code != event.event_code => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        expected = %event.event_code,
                        received = %registration.event_code,
                        "event registration does not match the validated event"
                    );
                    toasts.push(Toast::warning(messages::event_mismatch(
                        &event.event_code,
                        &registration.event_code,
                    )));
                    summary.event_name = None;
                    summary.event_code = None;
                    summary.registration_id = None;
                    summary.registered_at = None;
                }
                Some(_) => {}
                None => {
                    summary.event_name = Some(event.event_name.clone());
                    summary.event_code = Some(event.event_code.clone());
                }
            }
        }

        state.user_status = Some(summary);
        let mut state = Self::enter(state, Step::Complete);
        state.feedback = Feedback {
            field_errors: BTreeMap::new(),
            toasts,
        };
        state
    }
}
