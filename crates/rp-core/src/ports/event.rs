use async_trait::async_trait;

use crate::error::ApiError;
use crate::flow::EventSummary;

#[async_trait]
pub trait EventPort: Send + Sync {
    /// Resolve an event code to the event it belongs to.
    async fn validate_event_code(&self, code: &str) -> Result<EventSummary, ApiError>;
}
