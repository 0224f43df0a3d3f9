//! Port interfaces for the application layer
//!
//! Ports define the contract between the signup use cases and the backend
//! adapters. Every backend call reports failures as [`ApiError`] so the
//! classification in [`crate::feedback`] stays the single place that decides
//! what the user sees.
//!
//! [`ApiError`]: crate::error::ApiError

mod account;
mod clock;
mod event;
mod observer;
mod otp;
mod team;

pub use account::AccountPort;
pub use clock::ClockPort;
pub use event::EventPort;
pub use observer::{FlowObserverPort, PasswordResetObserverPort};
pub use otp::OtpPort;
pub use team::TeamPort;

