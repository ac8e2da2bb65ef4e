use std::path::PathBuf;
use serde::{Serialize, Deserialize};
use log::warn;

use super::lifelog::DEFAULT_CAPACITY;
use super::poller::DEFAULT_INTERVAL;

/// Directory under the platform config dir holding our files.
const CONFIG_DIR_NAME: &str = "triptych";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    /// Delay between refresh ticks, in milliseconds.
    pub poll_interval_ms: u64,
    /// How many log lines the ring buffer retains.
    pub log_capacity: usize,
    /// External log-inspection command line (e.g. "logcat -d"). When unset
    /// the in-process ring buffer is the log source.
    pub log_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            log_capacity: DEFAULT_CAPACITY,
            log_command: None,
        }
    }
}

impl Config {
    /// Load from the platform config dir, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = config_file_path() else { return Self::default() };
        match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    warn!("ignoring malformed config {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(CONFIG_DIR_NAME).join("config.json"))
}

/// Where the status store persists its entries.
pub fn statuses_file_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(CONFIG_DIR_NAME).join("statuses.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_timings() {
        let config = Config::default();
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.log_capacity, DEFAULT_CAPACITY);
        assert!(config.log_command.is_none());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: Config = serde_json::from_str(r#"{ "poll_interval_ms": 250 }"#).expect("parse");
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.log_capacity, DEFAULT_CAPACITY);
    }
}
