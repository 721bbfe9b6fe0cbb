//! File-based tracing setup.
//!
//! The terminal belongs to the TUI, so log output goes to
//! `<data_dir>/qa-assistant.log`. The filter comes from `QA_ASSISTANT_LOG`
//! when set, otherwise from the config's `log_level`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "QA_ASSISTANT_LOG";

/// Installs the global subscriber, appending to `log_path`.
///
/// # Errors
///
/// Returns `Err` if the log file cannot be opened. A second call in the same
/// process is a no-op.
pub fn init(log_path: &Path, default_level: &str) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();
    Ok(())
}
