//! Logging setup built on `fern`.
//!
//! All modules log through the `log` facade; this module wires the facade to
//! stderr and, when configured, to an append-only log file.

use anyhow::{Context, Result};
use chrono::Local;

use crate::config::LoggingConfig;

/// Build the dispatcher for the given configuration without installing it.
pub fn dispatch(config: &LoggingConfig) -> Result<fern::Dispatch> {
    let level = config.level_filter()?;

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // sqlx logs every statement at info
        .level_for("sqlx", log::LevelFilter::Warn)
        .level_for("sea_orm", log::LevelFilter::Warn)
        .chain(std::io::stderr());

    if let Some(path) = &config.file {
        let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
        dispatch = dispatch.chain(file);
    }

    Ok(dispatch)
}

/// Install the global logger.
pub fn init(config: &LoggingConfig) -> Result<()> {
    dispatch(config)?.apply().context("Logger already initialized")?;
    Ok(())
}
