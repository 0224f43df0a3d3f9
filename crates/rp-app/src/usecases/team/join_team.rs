use std::sync::Arc;
use std::time::Duration;

use tracing::{info, info_span, warn, Instrument};

use rp_core::error_message::extract_error_message;
use rp_core::ports::TeamPort;
use rp_core::team::TeamJoinRequest;
use rp_core::ApiError;

use crate::usecases::flow::with_timeout;
use crate::usecases::team::TeamStore;

pub const JOIN_FALLBACK: &str = "Failed to send join request.";

/// Ask to join a team and record the outcome in the team store.
pub struct JoinTeam {
    team_port: Arc<dyn TeamPort>,
    store: Arc<TeamStore>,
    request_timeout: Duration,
}

impl JoinTeam {
    pub fn new(team_port: Arc<dyn TeamPort>, store: Arc<TeamStore>, request_timeout: Duration) -> Self {
        Self {
            team_port,
            store,
            request_timeout,
        }
    }

    pub async fn execute(&self, team_id: &str) -> Result<TeamJoinRequest, ApiError> {
        let span = info_span!("usecase.join_team.execute", team_id = %team_id);
        async {
            let result = with_timeout(
                self.request_timeout,
                "request_join",
                self.team_port.request_join(team_id),
            )
            .await;

            match &result {
                Ok(request) => {
                    info!(request_id = %request.request_id, status = %request.status, "join request sent");
                    let request = request.clone();
                    self.store.update(|snapshot| {
                        snapshot.last_error = None;
                        snapshot.record_request(request);
                    });
                }
                Err(err) => {
                    let message = display_message(err);
                    warn!(error = %message, "join request rejected");
                    self.store
                        .update(|snapshot| snapshot.last_error = Some(message));
                }
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Backend rejections often arrive as the repr of a validation error list;
/// subscribers only ever see the unwrapped text.
fn display_message(err: &ApiError) -> String {
    let raw = match err {
        ApiError::Detail(_) | ApiError::NonFieldErrors(_) | ApiError::Messages(_) => {
            err.to_string()
        }
        ApiError::FieldErrors(fields) => fields
            .values()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(" "),
        ApiError::PendingVerification | ApiError::Timeout | ApiError::Unknown(_) => {
            return JOIN_FALLBACK.to_string()
        }
    };

    let message = extract_error_message(&raw);
    if message.trim().is_empty() {
        JOIN_FALLBACK.to_string()
    } else {
        message
    }
}
