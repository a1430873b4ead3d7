//! Process configuration, read from the environment by the binary.
//!
//! - `HTN_RISK_MODEL_PATH`: model directory (default `models`)
//! - `HTN_RISK_LOG_MODE`: `file`, `stdout` or `auto`
//! - `HTN_RISK_LOG_FILE`: log file path (default `htn-risk.log`)

use std::path::PathBuf;

pub const MODEL_PATH_ENV: &str = "HTN_RISK_MODEL_PATH";
pub const LOG_MODE_ENV: &str = "HTN_RISK_LOG_MODE";
pub const LOG_FILE_ENV: &str = "HTN_RISK_LOG_FILE";

const DEFAULT_MODEL_PATH: &str = "models";
const DEFAULT_LOG_FILE: &str = "htn-risk.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Parse a mode name; anything unrecognised means `Auto`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Whether to log to a file.
    ///
    /// Writing logs to the terminal corrupts the UI, so `Auto` picks the
    /// file whenever stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Configuration for the terminal application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_dir: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_PATH),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            model_dir: non_empty(MODEL_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),
            log_mode: non_empty(LOG_MODE_ENV)
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: non_empty(LOG_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let vars: HashMap<&str, &str> = [
            (MODEL_PATH_ENV, "/srv/htn/models"),
            (LOG_MODE_ENV, "STDOUT"),
            (LOG_FILE_ENV, "/var/log/htn.log"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.model_dir, PathBuf::from("/srv/htn/models"));
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.log_file, PathBuf::from("/var/log/htn.log"));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = AppConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_log_mode_selection() {
        assert!(LogMode::parse("file").use_file(false));
        assert!(!LogMode::parse("stdout").use_file(true));
        assert!(LogMode::parse("auto").use_file(true));
        assert!(!LogMode::parse("whatever").use_file(false));
    }
}
