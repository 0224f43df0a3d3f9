use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::bootstrap::config::{resolve_config, AppConfig};
use crate::bootstrap::tracing::init_tracing_subscriber;
use crate::bootstrap::wiring::wire_dependencies;
use crate::cli::{Cli, Command};
use crate::shell::{self, ConsoleObserver};

/// Load configuration, initialize logging, assemble the use cases and hand
/// control to the shell for the selected command.
pub async fn run_app(cli: Cli) -> anyhow::Result<()> {
    let config = load(&cli)?;
    let _log_guard = init_tracing_subscriber(&config.logging)
        .context("Failed to initialize logging")?;

    info!(api = %config.api.base_url, command = ?cli.selected_command(), "starting rangeportal");

    let observer = Arc::new(ConsoleObserver::new());
    let deps = wire_dependencies(&config, observer.clone(), observer)
        .context("Failed to set up the API client")?;

    match cli.selected_command() {
        Command::Signup => {
            if let Some(state) = shell::run_signup(&deps.flow).await? {
                if state.session.is_some() {
                    shell::offer_team_join(&deps.join_team, &deps.team_store).await?;
                }
            }
        }
        Command::ResetPassword => shell::run_password_reset(&deps.password_reset).await?,
        Command::JoinTeam { team_id } => match shell::run_signup(&deps.flow).await? {
            Some(state) if state.session.is_some() => {
                shell::join_team(&deps.join_team, &deps.team_store, &team_id).await?;
            }
            Some(_) => shell::print_login_required(),
            None => {}
        },
    }

    info!("rangeportal finished");
    Ok(())
}

fn load(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = resolve_config(cli.config.as_deref())?;
    config.apply_overrides(|key| std::env::var(key).ok(), cli.api_url.as_deref());
    Ok(config)
}
