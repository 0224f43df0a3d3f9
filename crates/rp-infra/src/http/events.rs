use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rp_core::flow::EventSummary;
use rp_core::ports::EventPort;
use rp_core::ApiError;

use crate::http::dto::{id_string, Envelope};
use crate::http::ApiClient;

const VALIDATE_CODE: &str = "/api/events/validate-code/";
const INVALID_CODE: &str = "Invalid event code";

#[derive(Serialize)]
struct ValidateCodeRequest<'a> {
    event_code: &'a str,
}

#[derive(Deserialize)]
struct ValidateCodeResponse {
    #[serde(deserialize_with = "id_string")]
    event_id: String,
    event_code: String,
    event_name: String,
    #[serde(default)]
    event_description: Option<String>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    #[serde(default)]
    is_upcoming: bool,
}

#[async_trait]
impl EventPort for ApiClient {
    async fn validate_event_code(&self, code: &str) -> Result<EventSummary, ApiError> {
        let envelope: Envelope = self
            .post_json(VALIDATE_CODE, &ValidateCodeRequest { event_code: code })
            .await?;
        let envelope = envelope.ensure_success(INVALID_CODE)?;

        if envelope.rest.get("valid") == Some(&serde_json::Value::Bool(false)) {
            return Err(ApiError::Detail(
                envelope.message.unwrap_or_else(|| INVALID_CODE.to_string()),
            ));
        }

        // Some deployments nest the event under `data`.
        let body = match envelope.data {
            Some(data @ serde_json::Value::Object(_)) => data,
            _ => serde_json::Value::Object(envelope.rest),
        };
        let response: ValidateCodeResponse = serde_json::from_value(body).map_err(|err| {
            ApiError::Unknown(format!("{VALIDATE_CODE}: unexpected response: {err}"))
        })?;

        Ok(EventSummary {
            event_id: response.event_id,
            event_code: response.event_code,
            event_name: response.event_name,
            event_description: response.event_description,
            starts_at: response.starts_at,
            ends_at: response.ends_at,
            is_upcoming: response.is_upcoming,
        })
    }
}
