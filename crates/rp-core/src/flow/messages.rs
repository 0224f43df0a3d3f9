//! User-facing strings of the signup flow.

pub const EVENT_CODE_REQUIRED: &str = "Please enter an event code.";
pub const EVENT_CODE_FALLBACK: &str = "Invalid event code. Please check and try again.";
pub const LOGIN_FIELDS_REQUIRED: &str = "Please enter your email and password.";
pub const LOGIN_FALLBACK: &str = "Login failed. Please check your credentials and try again.";
pub const NO_EVENT_SELECTED: &str = "Please enter a valid event code first.";
pub const USER_CHECK_FALLBACK: &str = "Failed to check user status. Please try again.";
pub const SEND_OTP_FALLBACK: &str = "Failed to send verification code.";
pub const OTP_SENT: &str = "Verification code sent to your email.";
pub const OTP_CODE_INVALID: &str = "Please enter the 6-digit verification code.";
pub const VERIFY_OTP_FALLBACK: &str = "Invalid or expired verification code.";
pub const VERIFICATION_REQUIRED: &str = "Please verify your email before registering.";
pub const REGISTRATION_FALLBACK: &str = "Registration failed. Please try again.";
pub const REGISTRATION_SUCCEEDED: &str = "Registration successful!";
pub const LOGIN_SUCCEEDED: &str = "Login successful! You are registered for the event.";
pub const ALREADY_REGISTERED_EVENT: &str = "You are already registered for this event.";

pub fn resend_wait(seconds: i64) -> String {
    format!("You can request a new code in {seconds} seconds.")
}

pub fn event_mismatch(expected: &str, received: &str) -> String {
    format!(
        "Your account was created, but the event confirmation ({received}) does not match the event code you entered ({expected}). Please contact the event organisers."
    )
}
