//! Signup flow domain module.
//!
//! This module defines the registration flow state machine types.

pub mod action;
pub mod event;
pub mod messages;
pub mod model;
pub mod state_machine;
pub mod step;
pub mod validation;

pub use action::FlowAction;
pub use event::FlowEvent;
pub use model::{
    AccountSummary, AuthTokens, EventRegistration, EventSummary, FlowState, FormField,
    LoginOutcome, RegistrationFormData, RegistrationOutcome, UserStatusSummary,
};
pub use state_machine::FlowStateMachine;
pub use step::{Progress, Step, StepTicket};
