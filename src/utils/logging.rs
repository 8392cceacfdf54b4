//! Tracing setup. The terminal is owned by the UI, so log lines go to
//! ~/.slither/slither.log instead of stderr.

use crate::core::constants::{LOG_ENV_VAR, LOG_FILE};
use crate::utils::persistence;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter used when `SLITHER_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init() -> io::Result<()> {
    let path = persistence::data_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
