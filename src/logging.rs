// src/logging.rs

//! `tracing` subscriber for the `dagviz` binary.
//!
//! The filter comes from `--log-level` if given, otherwise from `DAGVIZ_LOG`,
//! which accepts full `EnvFilter` directives (`debug`,
//! `dagviz::pipeline=trace,warn`). An unparsable `DAGVIZ_LOG` falls back to
//! `info`.
//!
//! Everything goes to stderr. When `dagviz convert` runs as the generator its
//! stdout *is* the DOT file.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "DAGVIZ_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let directive = filter_directive(cli_level, env.as_deref());

    fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    Ok(())
}

/// Pick the filter directive: CLI level, then a valid env value, then `info`.
pub fn filter_directive(cli_level: Option<LogLevel>, env: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return level_directive(level).to_string();
    }

    match env.map(str::trim) {
        Some(value) if !value.is_empty() && EnvFilter::try_new(value).is_ok() => {
            value.to_string()
        }
        _ => DEFAULT_DIRECTIVE.to_string(),
    }
}

fn level_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
