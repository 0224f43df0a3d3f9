//! Platform API adapters.
//!
//! [`ApiClient`] implements every backend port over HTTP + JSON. Failed
//! responses are decoded into [`rp_core::ApiError`] by [`error_body`].

mod accounts;
mod client;
mod dto;
pub mod error_body;
mod events;
mod otp;
mod teams;

pub use client::{ApiClient, ApiClientConfig, ApiClientError};
