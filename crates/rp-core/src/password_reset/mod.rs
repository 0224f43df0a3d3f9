//! Password-reset flow domain module.
//!
//! A three-step sibling of the signup flow: request a code by email, submit
//! the code with a new password, done. It shares the signup flow's error
//! classification, ticket guard and loading gate.

mod model;
mod state_machine;

pub use model::{
    ResetAction, ResetEvent, ResetField, ResetPasswordRequest, ResetState, ResetStep, ResetTicket,
};
pub use state_machine::{PasswordResetStateMachine, RESET_FALLBACK, RESET_SUCCEEDED};
