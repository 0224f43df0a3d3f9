use async_trait::async_trait;
use serde::Deserialize;

use rp_core::ports::TeamPort;
use rp_core::team::TeamJoinRequest;
use rp_core::ApiError;

use crate::http::dto::{id_string, Envelope};
use crate::http::ApiClient;

#[derive(Deserialize)]
struct JoinRequestData {
    #[serde(deserialize_with = "id_string")]
    request_id: String,
    team_name: String,
    status: String,
}

fn join_request_path(team_id: &str) -> String {
    format!("/api/teams/{team_id}/join-request/")
}

#[async_trait]
impl TeamPort for ApiClient {
    async fn request_join(&self, team_id: &str) -> Result<TeamJoinRequest, ApiError> {
        let path = join_request_path(team_id);
        let envelope: Envelope = self.post_json(&path, &serde_json::json!({})).await?;
        let data: JoinRequestData = envelope
            .ensure_success("Failed to send join request.")?
            .data(&path)?;

        Ok(TeamJoinRequest {
            request_id: data.request_id,
            team_id: team_id.to_string(),
            team_name: data.team_name,
            status: data.status,
        })
    }
}
