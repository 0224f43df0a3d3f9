use async_trait::async_trait;

use crate::error::ApiError;

#[async_trait]
pub trait OtpPort: Send + Sync {
    /// Email a one-time code; returns the backend's message.
    async fn send_otp(&self, email: &str) -> Result<String, ApiError>;

    /// Check a code; returns the `otp_id` that backs a registration.
    async fn verify_otp(&self, email: &str, code: &str) -> Result<String, ApiError>;
}
