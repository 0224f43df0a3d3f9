//! Wire shapes shared by the endpoint adapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use rp_core::flow::{AccountSummary, EventRegistration};
use rp_core::ApiError;

use crate::http::error_body;

/// `{success, message, data}` envelope used by most endpoints.
///
/// The whole body is kept so a `success: false` answer can be decoded like
/// any other error payload.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

impl Envelope {
    /// Fails with the decoded error when the backend reported `success: false`.
    pub fn ensure_success(self, fallback: &str) -> Result<Self, ApiError> {
        self.ensure_success_with(fallback, error_body::from_value)
    }

    pub fn ensure_success_with(
        self,
        fallback: &str,
        decode: error_body::Decoder,
    ) -> Result<Self, ApiError> {
        if self.success == Some(false) {
            let mut body = self.rest.clone();
            if let Some(message) = &self.message {
                body.insert("message".into(), Value::String(message.clone()));
            }
            if let Some(data) = &self.data {
                body.insert("data".into(), data.clone());
            }
            return Err(decode(&Value::Object(body))
                .unwrap_or_else(|| ApiError::Detail(fallback.to_string())));
        }
        Ok(self)
    }

    /// Decodes `data` as `T`.
    pub fn data<T: serde::de::DeserializeOwned>(self, endpoint: &str) -> Result<T, ApiError> {
        let data = self
            .data
            .ok_or_else(|| ApiError::Unknown(format!("{endpoint}: response has no data")))?;
        serde_json::from_value(data)
            .map_err(|err| ApiError::Unknown(format!("{endpoint}: unexpected data: {err}")))
    }
}

/// Ids arrive as numbers from some endpoints and strings from others.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Number(n) => n.to_string(),
        Id::Text(s) => s,
    })
}

pub(crate) fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "id_string")] String);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(id)| id))
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserDto {
    #[serde(default, alias = "user_id", deserialize_with = "opt_id_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<UserDto> for AccountSummary {
    fn from(user: UserDto) -> Self {
        AccountSummary {
            user_id: user.id,
            email: user.email,
            username: user.username,
            status: user.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventRegistrationDto {
    pub event_name: String,
    pub event_code: String,
    #[serde(default, alias = "id", deserialize_with = "opt_id_string")]
    pub registration_id: Option<String>,
    #[serde(default)]
    pub registered_at: Option<DateTime<Utc>>,
}

impl From<EventRegistrationDto> for EventRegistration {
    fn from(dto: EventRegistrationDto) -> Self {
        EventRegistration {
            event_name: dto.event_name,
            event_code: dto.event_code,
            registration_id: dto.registration_id,
            registered_at: dto.registered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "id_string")]
        id: String,
    }

    #[test]
    fn ids_accept_numbers_and_strings() {
        let n: Holder = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        let s: Holder = serde_json::from_str(r#"{"id": "42"}"#).unwrap();
        assert_eq!(n.id, "42");
        assert_eq!(s.id, "42");

        let user: UserDto = serde_json::from_str(r#"{"user_id": 7, "email": "a@b.org"}"#).unwrap();
        assert_eq!(user.id.as_deref(), Some("7"));
        let user: UserDto = serde_json::from_str(r#"{"email": "a@b.org"}"#).unwrap();
        assert_eq!(user.id, None);
    }

    #[test]
    fn unsuccessful_envelope_becomes_error() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"success": false, "message": "Event is full"}"#).unwrap();
        assert_eq!(
            envelope.ensure_success("fallback").unwrap_err(),
            ApiError::Detail("Event is full".into())
        );

        let envelope: Envelope = serde_json::from_str(
            r#"{"success": false, "message": "Validation failed", "errors": {"username": ["already taken"]}}"#,
        )
        .unwrap();
        assert!(matches!(
            envelope.ensure_success("fallback").unwrap_err(),
            ApiError::FieldErrors(ref fields) if fields.contains_key("username")
        ));

        let envelope: Envelope = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(
            envelope.ensure_success("fallback").unwrap_err(),
            ApiError::Detail("fallback".into())
        );
    }
}
