//! Backend error taxonomy.
//!
//! Backend failures arrive as loosely shaped JSON. Adapters decode them into
//! [`ApiError`] once, so the flow only ever matches on a closed set of shapes.

use std::collections::BTreeMap;

use thiserror::Error;

/// Message the backend returns when the email already holds a registration
/// for the selected event. Shown verbatim, never reclassified.
pub const ALREADY_REGISTERED_MESSAGE: &str = "You are already registered for this event";

/// A failed collaborator call, decoded from whatever the backend sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// `{field: [messages]}` validation map.
    #[error("validation failed for {}", .0.keys().cloned().collect::<Vec<_>>().join(", "))]
    FieldErrors(BTreeMap<String, Vec<String>>),

    /// `non_field_errors` list.
    #[error("{}", .0.join("; "))]
    NonFieldErrors(Vec<String>),

    /// Single human-readable detail string (also used for `success: false` business failures).
    #[error("{0}")]
    Detail(String),

    /// Bare list of messages.
    #[error("{}", .0.join("; "))]
    Messages(Vec<String>),

    /// Login rejected because the account has not confirmed its email yet.
    #[error("account pending verification")]
    PendingVerification,

    /// The call did not resolve within the configured request timeout.
    #[error("request timed out")]
    Timeout,

    /// Transport failure or a body with no recognisable shape.
    #[error("unexpected error: {0}")]
    Unknown(String),
}

/// Recovery class of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// User edits the form and resubmits the same step.
    FieldValidation,
    /// Expected outcome with precise wording; usually needs "Back".
    BusinessRule,
    /// Retryable by resubmitting, nothing was applied.
    Transport,
}

impl ApiError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ApiError::FieldErrors(_) => ErrorClass::FieldValidation,
            ApiError::NonFieldErrors(_)
            | ApiError::Detail(_)
            | ApiError::Messages(_)
            | ApiError::PendingVerification => ErrorClass::BusinessRule,
            ApiError::Timeout | ApiError::Unknown(_) => ErrorClass::Transport,
        }
    }

    /// True when the error is the backend's "already registered for this event" rejection,
    /// in whichever shape it was delivered.
    pub fn is_already_registered(&self) -> bool {
        match self {
            ApiError::Detail(message) => message.trim() == ALREADY_REGISTERED_MESSAGE,
            ApiError::NonFieldErrors(messages) | ApiError::Messages(messages) => messages
                .iter()
                .any(|m| m.trim() == ALREADY_REGISTERED_MESSAGE),
            _ => false,
        }
    }
}
