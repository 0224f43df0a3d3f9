//! Decoding of failed API responses.
//!
//! The platform answers failures in several shapes: DRF validation maps
//! (flat, under `errors` or under `detail`), `non_field_errors` lists,
//! `detail` strings, `{success: false, message}` envelopes and bare lists.
//! All of them collapse into [`ApiError`] here. Field maps win over any
//! message sent next to them.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde_json::{Map, Value};

use rp_core::error_message::extract_error_message;
use rp_core::ApiError;

/// Decodes a JSON error payload; `None` when nothing in it is displayable.
pub type Decoder = fn(&Value) -> Option<ApiError>;

/// Keys that describe the envelope or carry messages rather than a form field.
const ENVELOPE_KEYS: [&str; 12] = [
    "success",
    "status",
    "status_code",
    "code",
    "user_status",
    "data",
    "error_code",
    "message",
    "detail",
    "error",
    "errors",
    "non_field_errors",
];

pub fn parse_error_body(status: StatusCode, body: &[u8]) -> ApiError {
    parse_with(status, body, from_value)
}

/// Login failures additionally recognise an account pending verification.
pub fn parse_login_error_body(status: StatusCode, body: &[u8]) -> ApiError {
    parse_with(status, body, login_from_value)
}

pub(crate) fn parse_with(status: StatusCode, body: &[u8], decode: Decoder) -> ApiError {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => decode(&value).unwrap_or_else(|| from_status(status)),
        Err(_) => {
            let text = String::from_utf8_lossy(body);
            let text = text.trim();
            // HTML error pages are not worth showing.
            if text.is_empty() || text.starts_with('<') {
                from_status(status)
            } else {
                ApiError::Detail(extract_error_message(text))
            }
        }
    }
}

pub fn from_value(value: &Value) -> Option<ApiError> {
    match value {
        Value::String(message) if !message.trim().is_empty() => {
            Some(ApiError::Detail(extract_error_message(message)))
        }
        Value::Array(items) => {
            let messages = strings(items);
            (!messages.is_empty()).then_some(ApiError::Messages(messages))
        }
        Value::Object(object) => from_object(object),
        _ => None,
    }
}

pub fn login_from_value(value: &Value) -> Option<ApiError> {
    match value {
        Value::Object(object) if is_pending(object) => Some(ApiError::PendingVerification),
        _ => from_value(value),
    }
}

fn from_object(object: &Map<String, Value>) -> Option<ApiError> {
    let nested = ["errors", "detail"]
        .into_iter()
        .filter_map(|key| object.get(key).and_then(Value::as_object));

    // Flat top-level fields must be lists; a bare string next to the
    // envelope keys is payload, not a field error.
    let candidates = nested
        .clone()
        .map(|fields| field_errors(fields, true))
        .chain(std::iter::once(field_errors(object, false)));
    for fields in candidates {
        if !fields.is_empty() {
            return Some(ApiError::FieldErrors(fields));
        }
    }

    for holder in std::iter::once(object).chain(nested) {
        if let Some(Value::Array(items)) = holder.get("non_field_errors") {
            let messages = strings(items);
            if !messages.is_empty() {
                return Some(ApiError::NonFieldErrors(messages));
            }
        }
    }

    for key in ["detail", "message", "error"] {
        if let Some(Value::String(message)) = object.get(key) {
            if !message.trim().is_empty() {
                return Some(ApiError::Detail(extract_error_message(message)));
            }
        }
    }

    for key in ["errors", "detail"] {
        if let Some(Value::Array(items)) = object.get(key) {
            let messages = strings(items);
            if !messages.is_empty() {
                return Some(ApiError::Messages(messages));
            }
        }
    }

    None
}

fn is_pending(object: &Map<String, Value>) -> bool {
    let pending = |o: &Map<String, Value>| {
        o.get("user_status").and_then(Value::as_str) == Some("pending")
            || o.get("error_code").and_then(Value::as_str) == Some("pending_verification")
    };
    pending(object)
        || object
            .get("data")
            .and_then(Value::as_object)
            .is_some_and(pending)
}

fn field_errors(object: &Map<String, Value>, allow_strings: bool) -> BTreeMap<String, Vec<String>> {
    object
        .iter()
        .filter(|(key, _)| !ENVELOPE_KEYS.contains(&key.as_str()))
        .filter_map(|(key, value)| {
            let messages = match value {
                Value::Array(items) => strings(items),
                Value::String(message) if allow_strings => vec![extract_error_message(message)],
                _ => Vec::new(),
            };
            (!messages.is_empty()).then(|| (key.clone(), messages))
        })
        .collect()
}

fn strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(extract_error_message)
        .filter(|m| !m.trim().is_empty())
        .collect()
}

fn from_status(status: StatusCode) -> ApiError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ApiError::Timeout,
        _ => ApiError::Unknown(format!("HTTP {status}")),
    }
}
