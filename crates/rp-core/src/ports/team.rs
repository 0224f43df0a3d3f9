use async_trait::async_trait;

use crate::error::ApiError;
use crate::team::TeamJoinRequest;

#[async_trait]
pub trait TeamPort: Send + Sync {
    async fn request_join(&self, team_id: &str) -> Result<TeamJoinRequest, ApiError>;
}
