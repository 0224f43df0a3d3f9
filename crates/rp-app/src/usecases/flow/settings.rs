use std::future::Future;
use std::time::Duration;

use rp_core::ApiError;
use tracing::warn;

/// Runtime knobs of the flow controllers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSettings {
    /// Upper bound for every backend call.
    pub request_timeout: Duration,
    /// Wait imposed between two OTP requests.
    pub otp_resend_cooldown: Duration,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(15),
            otp_resend_cooldown: Duration::from_secs(60),
        }
    }
}

/// Awaits a backend call, turning expiry into [`ApiError::Timeout`].
pub(crate) async fn with_timeout<T>(
    timeout: Duration,
    call: &'static str,
    fut: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(Err(err)) if err.class() == rp_core::ErrorClass::Transport => {
            warn!(call, error = %err, "backend call failed");
            Err(err)
        }
        Ok(result) => result,
        Err(_) => {
            warn!(call, timeout_ms = timeout.as_millis() as u64, "backend call timed out");
            Err(ApiError::Timeout)
        }
    }
}
