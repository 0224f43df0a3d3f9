//! Signup flow controller.
//!
//! This module drives the signup state machine and its backend calls.

use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};

use rp_core::flow::{FlowAction, FlowEvent, FlowState, FlowStateMachine, FormField, Progress};
use rp_core::ports::{AccountPort, ClockPort, EventPort, FlowObserverPort, OtpPort};

use crate::usecases::flow::{with_timeout, FlowSettings, StateCell};

/// Controller that owns one signup flow and executes the calls it requests.
pub struct FlowController {
    state: StateCell<FlowState>,
    event_port: Arc<dyn EventPort>,
    account_port: Arc<dyn AccountPort>,
    otp_port: Arc<dyn OtpPort>,
    clock: Arc<dyn ClockPort>,
    observer: Arc<dyn FlowObserverPort>,
    settings: FlowSettings,
}

impl FlowController {
    pub fn new(
        event_port: Arc<dyn EventPort>,
        account_port: Arc<dyn AccountPort>,
        otp_port: Arc<dyn OtpPort>,
        clock: Arc<dyn ClockPort>,
        observer: Arc<dyn FlowObserverPort>,
        settings: FlowSettings,
    ) -> Self {
        Self {
            state: StateCell::new(FlowState::new()),
            event_port,
            account_port,
            otp_port,
            clock,
            observer,
            settings,
        }
    }

    pub async fn state(&self) -> FlowState {
        self.state.get().await
    }

    pub async fn progress(&self) -> Progress {
        self.state.get().await.progress()
    }

    pub async fn handle_input_change(&self, field: FormField, value: impl Into<String>) -> FlowState {
        self.dispatch(FlowEvent::InputChanged {
            field,
            value: value.into(),
        })
        .await
    }

    pub async fn dismiss_feedback(&self) -> FlowState {
        self.dispatch(FlowEvent::DismissFeedback).await
    }

    pub async fn submit_event_code(&self, code: impl Into<String>) -> FlowState {
        self.dispatch(FlowEvent::SubmitEventCode { code: code.into() })
            .await
    }

    pub async fn skip_event_code(&self) -> FlowState {
        self.dispatch(FlowEvent::SkipEventCode).await
    }

    pub async fn submit_login(&self) -> FlowState {
        self.dispatch(FlowEvent::SubmitLogin).await
    }

    pub async fn choose_create_account(&self) -> FlowState {
        self.dispatch(FlowEvent::ChooseCreateAccount).await
    }

    pub async fn submit_user_check(&self) -> FlowState {
        self.dispatch(FlowEvent::SubmitUserCheck).await
    }

    pub async fn send_otp(&self) -> FlowState {
        self.dispatch(FlowEvent::SendOtp).await
    }

    pub async fn resend_otp(&self) -> FlowState {
        let now = self.clock.now();
        self.dispatch(FlowEvent::ResendOtp { now }).await
    }

    pub async fn submit_otp(&self, code: impl Into<String>) -> FlowState {
        self.dispatch(FlowEvent::SubmitOtp { code: code.into() }).await
    }

    pub async fn submit_registration(&self) -> FlowState {
        self.dispatch(FlowEvent::SubmitRegistration).await
    }

    pub async fn back(&self) -> FlowState {
        self.dispatch(FlowEvent::Back).await
    }

    /// Applies `event`, then executes every requested call and applies its
    /// result, until the machine requests nothing more.
    pub async fn dispatch(&self, event: FlowEvent) -> FlowState {
        let span = info_span!("usecase.flow_controller.dispatch", event = event.name());
        async {
            let (mut current, mut pending) = self.apply(event).await;

            while let Some(action) = pending.pop() {
                let result = self.execute(action).await;
                let (next, follow_up) = self.apply(result).await;
                current = next;
                pending.extend(follow_up);
            }

            current
        }
        .instrument(span)
        .await
    }

    async fn apply(&self, event: FlowEvent) -> (FlowState, Vec<FlowAction>) {
        let event_name = event.name();
        let (from, next, actions) = self.state.apply(event, FlowStateMachine::transition).await;
        if from.current_step != next.current_step {
            info!(
                from = %from.current_step,
                to = %next.current_step,
                event = event_name,
                "flow state transition"
            );
        } else if from != next {
            debug!(
                step = %next.current_step,
                event = event_name,
                loading = next.is_loading,
                "flow state updated"
            );
        }
        if from != next {
            self.observer.emit_flow_state_changed(next.clone()).await;
        }
        (next, actions)
    }

    async fn execute(&self, action: FlowAction) -> FlowEvent {
        debug!(action = action.name(), ticket = ?action.ticket(), "flow executing action");
        let timeout = self.settings.request_timeout;

        match action {
            FlowAction::ValidateEventCode { ticket, code } => FlowEvent::EventCodeValidated {
                ticket,
                result: with_timeout(
                    timeout,
                    "validate_event_code",
                    self.event_port.validate_event_code(&code),
                )
                .await,
            },
            FlowAction::LoginAndJoinEvent {
                ticket,
                email,
                password,
                event_code,
            } => FlowEvent::LoginCompleted {
                ticket,
                result: with_timeout(
                    timeout,
                    "login_and_join_event",
                    self.account_port
                        .login_and_join_event(&email, &password, &event_code),
                )
                .await,
            },
            FlowAction::CheckUserStatus {
                ticket,
                email,
                event_code,
            } => FlowEvent::UserStatusChecked {
                ticket,
                result: with_timeout(
                    timeout,
                    "check_user_status",
                    self.account_port
                        .check_user_status(&email, event_code.as_deref()),
                )
                .await,
            },
            FlowAction::SendOtp { ticket, email } => {
                let result =
                    with_timeout(timeout, "send_otp", self.otp_port.send_otp(&email)).await;
                let cooldown = chrono::Duration::from_std(self.settings.otp_resend_cooldown)
                    .unwrap_or_else(|_| chrono::Duration::zero());
                FlowEvent::OtpSent {
                    ticket,
                    resend_available_at: self.clock.now() + cooldown,
                    result,
                }
            }
            FlowAction::VerifyOtp {
                ticket,
                email,
                code,
            } => FlowEvent::OtpVerified {
                ticket,
                result: with_timeout(timeout, "verify_otp", self.otp_port.verify_otp(&email, &code))
                    .await,
            },
            FlowAction::RegisterWithEvent {
                ticket,
                form,
                event_code,
            } => FlowEvent::Registered {
                ticket,
                result: with_timeout(
                    timeout,
                    "register_with_event",
                    self.account_port.register_with_event(&form, &event_code),
                )
                .await,
            },
            FlowAction::RegisterWithOtp {
                ticket,
                form,
                otp_id,
            } => FlowEvent::Registered {
                ticket,
                result: with_timeout(
                    timeout,
                    "register_with_otp",
                    self.account_port.register_with_otp(&form, &otp_id),
                )
                .await,
            },
        }
    }
}
