//! Log file setup.
//!
//! The terminal belongs to the UI, so everything goes to
//! `<state dir>/encore.log` through a non-blocking writer.

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_state_dir};

pub const LOG_FILE_NAME: &str = "encore.log";

/// Install the global subscriber. Keep the returned guard alive for the
/// whole session or buffered lines are lost.
///
/// Returns `None` when logging is disabled or could not be set up; the app
/// runs fine without it.
pub fn init(settings: &LoggingSettings) -> Option<WorkerGuard> {
    if !settings.enabled {
        return None;
    }

    let dir = settings.directory.clone().or_else(default_state_dir)?;
    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!("encore: cannot create log directory {}: {e}", dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    let installed = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init();

    if let Err(e) = installed {
        eprintln!("encore: failed to initialise logging: {e}");
        return None;
    }

    Some(guard)
}
