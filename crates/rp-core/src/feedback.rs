//! User-facing feedback: inline field errors and toasts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Banner shown once alongside inline field errors.
pub const FIELD_ERRORS_BANNER: &str = "Please correct the errors below and try again.";

/// Shown when a login is refused because the account has not been verified.
pub const PENDING_VERIFICATION_MESSAGE: &str =
    "Your account is pending verification. Please check your email for the verification link.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Error,
    Warning,
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Warning,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }
}

/// Feedback currently displayed by a flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Backend or local validation message per field name.
    pub field_errors: BTreeMap<String, String>,
    pub toasts: Vec<Toast>,
}

impl Feedback {
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.toasts.is_empty()
    }

    pub fn clear(&mut self) {
        self.field_errors.clear();
        self.toasts.clear();
    }

    pub fn toast(toast: Toast) -> Self {
        Self {
            field_errors: BTreeMap::new(),
            toasts: vec![toast],
        }
    }

    /// Field errors from local validation, with the standard banner.
    pub fn fields(field_errors: BTreeMap<String, String>) -> Self {
        Self {
            field_errors,
            toasts: vec![Toast::error(FIELD_ERRORS_BANNER)],
        }
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.toasts.iter().map(|t| t.message.as_str())
    }
}

/// Turn a failed call into feedback.
///
/// Total over [`ApiError`]; `fallback` is the action-specific message used when
/// the error carries nothing displayable.
pub fn classify(error: &ApiError, fallback: &str) -> Feedback {
    if error.is_already_registered() {
        return Feedback::toast(Toast::error(crate::error::ALREADY_REGISTERED_MESSAGE));
    }

    match error {
        ApiError::FieldErrors(fields) => {
            let field_errors: BTreeMap<String, String> = fields
                .iter()
                .filter_map(|(field, messages)| {
                    let joined = join_messages(messages);
                    (!joined.is_empty()).then(|| (field.clone(), joined))
                })
                .collect();
            if field_errors.is_empty() {
                Feedback::toast(Toast::error(fallback))
            } else {
                Feedback::fields(field_errors)
            }
        }
        ApiError::NonFieldErrors(messages) | ApiError::Messages(messages) => {
            let toasts: Vec<Toast> = messages
                .iter()
                .filter(|m| !m.trim().is_empty())
                .map(|m| Toast::error(m.clone()))
                .collect();
            if toasts.is_empty() {
                Feedback::toast(Toast::error(fallback))
            } else {
                Feedback {
                    field_errors: BTreeMap::new(),
                    toasts,
                }
            }
        }
        ApiError::Detail(message) if !message.trim().is_empty() => {
            Feedback::toast(Toast::error(message.clone()))
        }
        ApiError::PendingVerification => {
            Feedback::toast(Toast::warning(PENDING_VERIFICATION_MESSAGE))
        }
        ApiError::Detail(_) | ApiError::Timeout | ApiError::Unknown(_) => {
            Feedback::toast(Toast::error(fallback))
        }
    }
}

fn join_messages(messages: &[String]) -> String {
    messages
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ALREADY_REGISTERED_MESSAGE;

    const FALLBACK: &str = "Failed to reset password.";

    #[test]
    fn field_map_sets_field_slots_and_one_banner() {
        let mut fields = BTreeMap::new();
        fields.insert("username".to_string(), vec!["already taken".to_string()]);
        fields.insert(
            "password".to_string(),
            vec!["too short".to_string(), "too common".to_string()],
        );

        let feedback = classify(&ApiError::FieldErrors(fields), FALLBACK);

        assert_eq!(feedback.field_error("username"), Some("already taken"));
        assert_eq!(feedback.field_error("password"), Some("too short too common"));
        assert_eq!(feedback.toasts, vec![Toast::error(FIELD_ERRORS_BANNER)]);
    }

    #[test]
    fn non_field_errors_become_one_toast_each() {
        let feedback = classify(
            &ApiError::NonFieldErrors(vec!["first".into(), "second".into()]),
            FALLBACK,
        );

        assert!(feedback.field_errors.is_empty());
        assert_eq!(feedback.messages().collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[test]
    fn detail_is_shown_unmodified() {
        let feedback = classify(&ApiError::Detail("  Code expired  ".into()), FALLBACK);
        assert_eq!(feedback.messages().collect::<Vec<_>>(), vec!["  Code expired  "]);
    }

    #[test]
    fn message_list_becomes_one_toast_each() {
        let feedback = classify(&ApiError::Messages(vec!["a".into(), "b".into()]), FALLBACK);
        assert_eq!(feedback.toasts.len(), 2);
    }

    #[test]
    fn shapeless_errors_use_the_action_fallback() {
        for error in [
            ApiError::Unknown("connection reset".into()),
            ApiError::Timeout,
            ApiError::Detail("   ".into()),
            ApiError::Messages(vec![]),
            ApiError::FieldErrors(BTreeMap::new()),
        ] {
            let feedback = classify(&error, FALLBACK);
            assert_eq!(feedback, Feedback::toast(Toast::error(FALLBACK)), "{error:?}");
        }
    }

    #[test]
    fn already_registered_bypasses_generic_classification() {
        let feedback = classify(
            &ApiError::NonFieldErrors(vec![
                "something else".into(),
                ALREADY_REGISTERED_MESSAGE.into(),
            ]),
            FALLBACK,
        );
        assert_eq!(
            feedback.messages().collect::<Vec<_>>(),
            vec![ALREADY_REGISTERED_MESSAGE]
        );
    }

    #[test]
    fn pending_verification_has_its_own_wording() {
        let feedback = classify(&ApiError::PendingVerification, FALLBACK);
        assert_eq!(
            feedback.toasts,
            vec![Toast::warning(PENDING_VERIFICATION_MESSAGE)]
        );
    }
}
