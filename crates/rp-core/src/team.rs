//! Team membership models shared by the team store and the join use case.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: String,
    pub name: String,
    pub event_code: Option<String>,
}

/// A pending request to join a team, as acknowledged by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamJoinRequest {
    pub request_id: String,
    pub team_id: String,
    pub team_name: String,
    pub status: String,
}

/// What every subscriber of the team store sees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub teams: Vec<Team>,
    pub pending_requests: Vec<TeamJoinRequest>,
    /// Display-ready message of the last failed team operation.
    pub last_error: Option<String>,
}

impl TeamSnapshot {
    pub fn has_pending_request(&self, team_id: &str) -> bool {
        self.pending_requests.iter().any(|r| r.team_id == team_id)
    }

    /// Record a request, replacing an older one for the same team.
    pub fn record_request(&mut self, request: TeamJoinRequest) {
        self.pending_requests.retain(|r| r.team_id != request.team_id);
        self.pending_requests.push(request);
    }
}
