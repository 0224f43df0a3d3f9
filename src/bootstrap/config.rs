//! # Configuration Loader
//!
//! ## Responsibilities
//!
//! - Read TOML configuration files
//! - Parse TOML into the [`AppConfig`] DTO, missing keys taking their defaults
//! - Apply `RANGEPORTAL_API_URL` and the `--api-url` flag on top
//! - Report I/O and parsing errors with context
//!
//! Pure data loading: values are accepted as written. The API client rejects
//! an unusable base URL when it is built.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use rp_app::FlowSettings;

pub const API_URL_ENV: &str = "RANGEPORTAL_API_URL";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiSection,
    pub flow: FlowSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FlowSection {
    pub otp_resend_cooldown_secs: u64,
}

impl Default for FlowSection {
    fn default() -> Self {
        Self {
            otp_resend_cooldown_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Filter directives used when `RUST_LOG` is unset.
    pub level: Option<String>,
    /// Write logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    pub fn flow_settings(&self) -> FlowSettings {
        FlowSettings {
            request_timeout: self.request_timeout(),
            otp_resend_cooldown: Duration::from_secs(self.flow.otp_resend_cooldown_secs),
        }
    }

    /// Environment first, then the command line flag.
    pub fn apply_overrides(
        &mut self,
        env_lookup: impl Fn(&str) -> Option<String>,
        api_url_flag: Option<&str>,
    ) {
        if let Some(url) = env_lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(url) = api_url_flag {
            self.api.base_url = url.to_string();
        }
    }
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML for
/// [`AppConfig`].
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

/// Default location: `<config dir>/rangeportal/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rangeportal").join(CONFIG_FILE_NAME))
}

/// An explicit path must exist; the default path is optional.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => match default_config_path() {
            Some(path) if path.exists() => load_config(&path),
            _ => Ok(AppConfig::default()),
        },
    }
}
