//! Local checks run before a submission reaches the backend.

use std::collections::BTreeMap;

use email_address::EmailAddress;

use crate::flow::model::{FormField, RegistrationFormData};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const OTP_CODE_LEN: usize = 6;

pub fn is_valid_email(email: &str) -> bool {
    EmailAddress::is_valid(email.trim())
}

pub fn is_valid_otp_code(code: &str) -> bool {
    code.len() == OTP_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

/// Field errors for the email-only steps.
pub fn validate_email(email: &str) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    if email.trim().is_empty() {
        errors.insert(FormField::Email.to_string(), "Email is required.".to_string());
    } else if !is_valid_email(email) {
        errors.insert(
            FormField::Email.to_string(),
            "Enter a valid email address.".to_string(),
        );
    }
    errors
}

/// Checks a new password and its confirmation, keyed by the given field names.
pub fn validate_new_password(
    password: &str,
    confirm: &str,
    password_field: &str,
    confirm_field: &str,
) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    if password.is_empty() {
        errors.insert(password_field.to_string(), "Password is required.".to_string());
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            password_field.to_string(),
            format!("Password must be at least {MIN_PASSWORD_LEN} characters."),
        );
    }

    if confirm.is_empty() {
        errors.insert(
            confirm_field.to_string(),
            "Please confirm your password.".to_string(),
        );
    } else if password != confirm {
        errors.insert(confirm_field.to_string(), "Passwords do not match.".to_string());
    }
    errors
}

/// Field errors for the profile form; empty when the form can be submitted.
pub fn validate_registration(form: &RegistrationFormData) -> BTreeMap<String, String> {
    let mut errors = validate_email(&form.email);

    for (field, label) in [
        (FormField::Username, "Username"),
        (FormField::FirstName, "First name"),
        (FormField::LastName, "Last name"),
    ] {
        if form.get(field).map_or(true, |v| v.trim().is_empty()) {
            errors.insert(field.to_string(), format!("{label} is required."));
        }
    }

    errors.extend(validate_new_password(
        &form.password,
        &form.password_confirm,
        FormField::Password.as_str(),
        FormField::PasswordConfirm.as_str(),
    ));
    errors
}
