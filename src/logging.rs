// src/logging.rs

//! Logging setup for `sasstpl` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining what gets logged:
//! 1. `--log-level` CLI flag, applied to this crate only
//! 2. `SASSTPL_LOG`, either a bare level (`debug`) or full filter
//!    directives (`sasstpl=trace,notify=debug`)
//! 3. `info` for this crate, `warn` for everything else
//!
//! Logs go to STDERR. Reload lines are printed on stdout by the notifier
//! and are not affected by the filter.

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "SASSTPL_LOG";

/// Install the global subscriber. Fails if one is already set.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(cli_level, env.as_deref())?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

/// Filter for the given CLI level and `SASSTPL_LOG` value.
pub fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> Result<EnvFilter> {
    if let Some(lvl) = cli_level {
        return Ok(crate_filter(level_from_log_level(lvl)));
    }

    match env.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(crate_filter(Level::INFO)),
        Some(raw) => match parse_level_str(raw) {
            Some(level) => Ok(crate_filter(level)),
            None => EnvFilter::try_new(raw)
                .map_err(|e| anyhow!("invalid {LOG_ENV_VAR} value {raw:?}: {e}")),
        },
    }
}

fn crate_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_ascii_lowercase();
    EnvFilter::new(format!("warn,sasstpl={level}"))
}

fn level_from_log_level(lvl: LogLevel) -> Level {
    match lvl {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}

pub fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
