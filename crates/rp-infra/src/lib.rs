//! Infrastructure adapters for RangePortal.
//!
//! `http` implements the backend ports over the platform's JSON API;
//! `time` provides the wall clock.

pub mod http;
pub mod time;

pub use http::{ApiClient, ApiClientConfig, ApiClientError};
pub use time::SystemClock;
