use std::fmt;

use serde::{Deserialize, Serialize};

/// A page of the signup flow.
///
/// `OtpSend` and `OtpVerify` only serve the path without an event code. The
/// event-bound path goes from `UserCheck` straight to `Registration` because
/// the event registration endpoint sends its own verification email after the
/// account is created. Do not make OTP unconditional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    EventCode,
    LoginSignup,
    UserCheck,
    OtpSend,
    OtpVerify,
    Registration,
    Complete,
}

impl Step {
    /// Canonical order, used for progress reporting.
    pub const ALL: [Step; 7] = [
        Step::EventCode,
        Step::LoginSignup,
        Step::UserCheck,
        Step::OtpSend,
        Step::OtpVerify,
        Step::Registration,
        Step::Complete,
    ];

    pub fn index(self) -> usize {
        match self {
            Step::EventCode => 0,
            Step::LoginSignup => 1,
            Step::UserCheck => 2,
            Step::OtpSend => 3,
            Step::OtpVerify => 4,
            Step::Registration => 5,
            Step::Complete => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Step::EventCode => "event-code",
            Step::LoginSignup => "login-signup",
            Step::UserCheck => "user-check",
            Step::OtpSend => "otp-send",
            Step::OtpVerify => "otp-verify",
            Step::Registration => "registration",
            Step::Complete => "complete",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Step::Complete
    }

    pub fn progress(self) -> Progress {
        let total = Self::ALL.len();
        let current = self.index() + 1;
        Progress {
            current,
            total,
            percentage: current as f64 / total as f64 * 100.0,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a step among the seven canonical steps.
///
/// The total never shrinks for users who skip the OTP steps, so the
/// event-bound path advances in larger jumps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub percentage: f64,
}

/// Identity of one visit to one step.
///
/// Every backend call carries the ticket that was current when it was
/// dispatched; its result is applied only while that ticket is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTicket {
    pub step: Step,
    pub visit: u64,
}
