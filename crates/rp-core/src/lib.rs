//! # rp-core
//!
//! Core domain models and business logic for the RangePortal signup flow.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod error;
pub mod error_message;
pub mod feedback;
pub mod flow;
pub mod password_reset;
pub mod ports;
pub mod team;

// Re-export commonly used types at the crate root
pub use error::{ApiError, ErrorClass};
pub use error_message::extract_error_message;
pub use feedback::{classify, Feedback, Toast, ToastKind};
pub use flow::{
    FlowAction, FlowEvent, FlowState, FlowStateMachine, FormField, Progress, Step, StepTicket,
};
