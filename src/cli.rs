use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sign up for cyber range events from the terminal.
#[derive(Debug, Parser)]
#[command(name = "rangeportal", version, about)]
pub struct Cli {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Override the platform API origin
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Register for an event or log in (default)
    Signup,
    /// Reset a forgotten password with an emailed code
    ResetPassword,
    /// Log in, then ask to join a team
    JoinTeam {
        /// Identifier of the team to join
        team_id: String,
    },
}

impl Cli {
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Signup)
    }
}
