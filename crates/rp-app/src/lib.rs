//! RangePortal Application Orchestration Layer
//!
//! This crate drives the pure state machines of `rp-core` against the backend
//! ports: it executes the actions they request, feeds the results back and
//! publishes every settled state.

pub mod usecases;

pub use usecases::{
    FlowController, FlowSettings, JoinTeam, PasswordResetController, TeamStore,
};
