//! User configuration for qa-assistant.
//!
//! Read once at startup from `config.toml`. Every field has a default; a
//! missing file is normal, and a file that fails to parse is reported and then
//! ignored so a config typo never prevents startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::analysis::types::WorkerDelays;

/// Settings from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `"dark"` or `"light"`.
    pub theme: String,
    /// Where the session database and log file live.
    pub data_dir: Option<PathBuf>,
    /// Default tracing filter when `QA_ASSISTANT_LOG` is unset.
    pub log_level: String,
    pub analysis_delay_ms: u64,
    pub api_key_check_delay_ms: u64,
    pub analysis_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_owned(),
            data_dir: None,
            log_level: "info".to_owned(),
            analysis_delay_ms: qa_assistant_core::mock::ANALYSIS_DELAY.as_millis() as u64,
            api_key_check_delay_ms: qa_assistant_core::mock::KEY_CHECK_DELAY.as_millis() as u64,
            analysis_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn worker_delays(&self) -> WorkerDelays {
        WorkerDelays {
            analysis: Duration::from_millis(self.analysis_delay_ms),
            key_check: Duration::from_millis(self.api_key_check_delay_ms),
        }
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs.max(1))
    }
}

/// Returns the default config file path.
///
/// Prefers `$XDG_CONFIG_HOME/qa-assistant/config.toml`; falls back to
/// `~/.config/qa-assistant/config.toml` when the env var is absent.
pub fn default_config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("qa-assistant").join("config.toml")
}

/// Returns the default data directory.
///
/// Prefers `$XDG_DATA_HOME/qa-assistant`; falls back to
/// `~/.local/share/qa-assistant`, then `./.qa-assistant`.
pub fn default_data_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".local").join("share"))
        })
        .map(|base| base.join("qa-assistant"))
        .unwrap_or_else(|| PathBuf::from(".qa-assistant"))
}

/// Loads the config at `path`.
///
/// Returns the config plus an optional warning to log once logging is up
/// (logging itself is configured from this file, so it cannot log here).
pub fn load_config(path: &Path) -> (Config, Option<String>) {
    let raw = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return (Config::default(), None),
        Err(e) => {
            return (
                Config::default(),
                Some(format!("could not read config {}: {e}", path.display())),
            )
        }
    };
    match toml::from_str::<Config>(&raw) {
        Ok(config) => (config, None),
        Err(e) => (
            Config::default(),
            Some(format!("config parse error in {}: {e}", path.display())),
        ),
    }
}
