use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};

use rp_core::password_reset::{
    PasswordResetStateMachine, ResetAction, ResetEvent, ResetField, ResetState,
};
use rp_core::ports::{AccountPort, OtpPort, PasswordResetObserverPort};

use crate::usecases::flow::{with_timeout, FlowSettings, StateCell};

/// Drives one password-reset flow.
pub struct PasswordResetController {
    state: StateCell<ResetState>,
    account_port: Arc<dyn AccountPort>,
    otp_port: Arc<dyn OtpPort>,
    observer: Arc<dyn PasswordResetObserverPort>,
    settings: FlowSettings,
}

impl PasswordResetController {
    pub fn new(
        account_port: Arc<dyn AccountPort>,
        otp_port: Arc<dyn OtpPort>,
        observer: Arc<dyn PasswordResetObserverPort>,
        settings: FlowSettings,
    ) -> Self {
        Self {
            state: StateCell::new(ResetState::new()),
            account_port,
            otp_port,
            observer,
            settings,
        }
    }

    pub async fn state(&self) -> ResetState {
        self.state.get().await
    }

    pub async fn handle_input_change(
        &self,
        field: ResetField,
        value: impl Into<String>,
    ) -> ResetState {
        self.dispatch(ResetEvent::InputChanged {
            field,
            value: value.into(),
        })
        .await
    }

    pub async fn request_code(&self) -> ResetState {
        self.dispatch(ResetEvent::RequestCode).await
    }

    pub async fn submit_reset(&self) -> ResetState {
        self.dispatch(ResetEvent::SubmitReset).await
    }

    pub async fn back(&self) -> ResetState {
        self.dispatch(ResetEvent::Back).await
    }

    pub async fn dispatch(&self, event: ResetEvent) -> ResetState {
        let span = info_span!("usecase.password_reset.dispatch", event = event.name());
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

    async fn apply(&self, event: ResetEvent) -> (ResetState, Vec<ResetAction>) {
        let event_name = event.name();
        let (from, next, actions) = self
            .state
            .apply(event, PasswordResetStateMachine::transition)
            .await;
        if from.current_step != next.current_step {
            info!(
                from = %from.current_step,
                to = %next.current_step,
                event = event_name,
                "password reset state transition"
            );
        } else if from != next {
            debug!(
                step = %next.current_step,
                event = event_name,
                loading = next.is_loading,
                "password reset state updated"
            );
        }
        if from != next {
            self.observer.emit_reset_state_changed(next.clone()).await;
        }
        (next, actions)
    }

    async fn execute(&self, action: ResetAction) -> ResetEvent {
        debug!(action = action.name(), "password reset executing action");
        let timeout = self.settings.request_timeout;
        match action {
            ResetAction::SendCode { ticket, email } => ResetEvent::CodeSent {
                ticket,
                result: with_timeout(timeout, "send_otp", self.otp_port.send_otp(&email)).await,
            },
            ResetAction::ResetPassword { ticket, request } => ResetEvent::PasswordReset {
                ticket,
                result: with_timeout(
                    timeout,
                    "reset_password",
                    self.account_port.reset_password(&request),
                )
                .await,
            },
        }
    }
}
