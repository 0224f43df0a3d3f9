//! Tracing configuration for RangePortal
//!
//! Console output goes to stderr so it never interleaves with the prompts on
//! stdout. When `[logging] file` is set, logs go to that file instead.

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

use crate::bootstrap::config::LoggingSection;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// - **Development**: debug for the workspace crates
/// - **Production**: info for the workspace crates
/// - HTTP internals stay at warn either way
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        format!("rp_app={level}"),
        format!("rp_infra={level}"),
        "reqwest=warn".to_string(),
        "hyper_util=warn".to_string(),
        "rustls=warn".to_string(),
    ]
}

fn build_env_filter(logging: &LoggingSection) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match &logging.level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::new(build_filter_directives(is_development()).join(",")),
    })
}

/// Initialize the global tracing subscriber.
///
/// The returned guard flushes the file writer and must live until exit.
///
/// ## Errors
///
/// Returns `Err` if the log file cannot be created or a subscriber is
/// already registered.
pub fn init_tracing_subscriber(logging: &LoggingSection) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = build_env_filter(logging);

    match &logging.file {
        Some(path) => {
            let (writer, guard) = build_file_writer(path)?;
            let file_layer = fmt::layer()
                .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer);
            registry().with(env_filter).with(file_layer).try_init()?;
            Ok(Some(guard))
        }
        None => {
            let stderr_layer = fmt::layer()
                .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
                .with_level(true)
                .with_target(true)
                .with_ansi(cfg!(not(test)))
                .with_writer(io::stderr);
            registry().with(env_filter).with(stderr_layer).try_init()?;
            Ok(None)
        }
    }
}

fn build_file_writer(
    path: &Path,
) -> anyhow::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log file path has no file name: {}", path.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(file_appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true);
        assert!(dev_directives.contains(&"debug".to_string()));
        assert!(dev_directives.contains(&"rp_app=debug".to_string()));
        assert!(dev_directives.contains(&"reqwest=warn".to_string()));

        let prod_directives = build_filter_directives(false);
        assert!(prod_directives.contains(&"info".to_string()));
        assert!(prod_directives.contains(&"rp_infra=info".to_string()));
    }

    #[test]
    fn test_file_writer_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("rangeportal.log");

        let (_writer, _guard) = build_file_writer(&path).unwrap();

        assert!(dir.path().join("logs").is_dir());
    }
}
