use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use rp_core::ports::OtpPort;
use rp_core::ApiError;

use crate::http::dto::{id_string, Envelope};
use crate::http::ApiClient;

const SEND_OTP: &str = "/api/auth/send-otp/";
const VERIFY_OTP: &str = "/api/auth/verify-otp/";

#[derive(Serialize)]
struct SendOtpRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct VerifyOtpRequest<'a> {
    email: &'a str,
    otp_code: &'a str,
}

#[derive(Deserialize)]
struct VerifyOtpData {
    #[serde(deserialize_with = "id_string")]
    otp_id: String,
}

#[async_trait]
impl OtpPort for ApiClient {
    async fn send_otp(&self, email: &str) -> Result<String, ApiError> {
        let envelope: Envelope = self.post_json(SEND_OTP, &SendOtpRequest { email }).await?;
        let envelope = envelope.ensure_success("Failed to send verification code.")?;
        Ok(envelope.message.unwrap_or_default())
    }

    async fn verify_otp(&self, email: &str, code: &str) -> Result<String, ApiError> {
        let envelope: Envelope = self
            .post_json(
                VERIFY_OTP,
                &VerifyOtpRequest {
                    email,
                    otp_code: code,
                },
            )
            .await?;
        let data: VerifyOtpData = envelope
            .ensure_success("Invalid or expired verification code.")?
            .data(VERIFY_OTP)?;
        Ok(data.otp_id)
    }
}
