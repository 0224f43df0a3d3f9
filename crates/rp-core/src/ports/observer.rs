use crate::flow::FlowState;
use crate::password_reset::ResetState;

/// Receives every state a flow controller settles on.
#[async_trait::async_trait]
pub trait FlowObserverPort: Send + Sync {
    async fn emit_flow_state_changed(&self, state: FlowState);
}

#[async_trait::async_trait]
pub trait PasswordResetObserverPort: Send + Sync {
    async fn emit_reset_state_changed(&self, state: ResetState);
}
