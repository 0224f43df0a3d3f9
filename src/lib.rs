//! Terminal client for the RangePortal event signup flow.
//!
//! `bootstrap` assembles the use cases from `rp-app` with the adapters from
//! `rp-infra`; `shell` renders flow state and collects input.

pub mod bootstrap;
pub mod cli;
pub mod shell;
