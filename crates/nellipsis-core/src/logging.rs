//! File logging for the nellipsis binary
//!
//! The interactive viewer owns the terminal, so every crate logs through
//! `tracing` into daily files:
//!
//! ```text
//! <data_local_dir>/nested-ellipsis/logs/nellipsis.YYYY-MM-DD.log
//! ```
//!
//! Only the last [`MAX_LOG_FILES`] days are kept.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV_VAR: &str = "NELLIPSIS_LOG";

/// Library crates (`nellipsis_*`) and the binary (`nested_ellipsis`) at info
const DEFAULT_FILTER: &str = "nellipsis=info,nested_ellipsis=info,warn";

pub const MAX_LOG_FILES: usize = 7;

/// Initialize the logging subsystem
///
/// # Examples
/// ```bash
/// NELLIPSIS_LOG=debug nellipsis --file lorem.html
/// NELLIPSIS_LOG=nellipsis_engine=trace nellipsis -i --file lorem.html
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("nellipsis")
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(&log_dir)
        .map_err(|e| Error::Io(std::io::Error::other(e)))?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("logging to {}", log_dir.display());

    Ok(())
}

/// Filter from [`LOG_ENV_VAR`], or the default when unset or invalid
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Directory holding the daily log files
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nested-ellipsis")
        .join("logs")
}
