//! # Dependency Injection
//!
//! Builds the infrastructure adapters and hands them to the use cases
//! through their ports. Assembly only: no flow decisions are taken here.

use std::sync::Arc;

use rp_app::{FlowController, JoinTeam, PasswordResetController, TeamStore};
use rp_core::ports::{
    AccountPort, ClockPort, EventPort, FlowObserverPort, OtpPort, PasswordResetObserverPort,
    TeamPort,
};
use rp_infra::{ApiClient, ApiClientConfig, ApiClientError, SystemClock};

use crate::bootstrap::config::AppConfig;

/// Everything the shell needs for one session.
///
/// All use cases share one [`ApiClient`], so the access token stored by a
/// successful login is sent by the team calls that follow.
pub struct AppDeps {
    pub flow: FlowController,
    pub password_reset: PasswordResetController,
    pub join_team: JoinTeam,
    pub team_store: Arc<TeamStore>,
}

pub fn wire_dependencies(
    config: &AppConfig,
    flow_observer: Arc<dyn FlowObserverPort>,
    reset_observer: Arc<dyn PasswordResetObserverPort>,
) -> Result<AppDeps, ApiClientError> {
    let settings = config.flow_settings();

    let api = Arc::new(ApiClient::new(ApiClientConfig {
        base_url: config.api.base_url.clone(),
        timeout: settings.request_timeout,
    })?);
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    let event_port: Arc<dyn EventPort> = api.clone();
    let account_port: Arc<dyn AccountPort> = api.clone();
    let otp_port: Arc<dyn OtpPort> = api.clone();
    let team_port: Arc<dyn TeamPort> = api;

    let team_store = Arc::new(TeamStore::new());

    Ok(AppDeps {
        flow: FlowController::new(
            event_port,
            account_port.clone(),
            otp_port.clone(),
            clock,
            flow_observer,
            settings.clone(),
        ),
        password_reset: PasswordResetController::new(
            account_port,
            otp_port,
            reset_observer,
            settings.clone(),
        ),
        join_team: JoinTeam::new(team_port, team_store.clone(), settings.request_timeout),
        team_store,
    })
}
