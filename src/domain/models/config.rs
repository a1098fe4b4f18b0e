use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::severity::Severity;

/// Settings consumed by the bootstrap sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BootstrapSettings {
    /// Location of the `.env` source, resolved against the search path when relative
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Name of the logger the bootstrap hands to the application
    #[serde(default = "default_logger_name")]
    pub logger_name: String,

    /// Logger options
    #[serde(default)]
    pub logging: LoggerOptions,
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

fn default_logger_name() -> String {
    "appboot".to_string()
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
            logger_name: default_logger_name(),
            logging: LoggerOptions::default(),
        }
    }
}

/// Options recognized when constructing a named logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggerOptions {
    /// Directory holding the log files, created when missing
    #[serde(default = "default_log_directory")]
    pub log_directory: PathBuf,

    /// Minimum severity written to the log file
    #[serde(default = "default_file_level")]
    pub file_level: Severity,

    /// Minimum severity written to the console
    #[serde(default = "default_console_level")]
    pub console_level: Severity,

    /// Size in bytes past which the active file is rotated (0 disables rotation)
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    /// Number of rotated files kept next to the active one
    #[serde(default = "default_backup_count")]
    pub backup_count: usize,
}

fn default_log_directory() -> PathBuf {
    PathBuf::from("logs")
}

const fn default_file_level() -> Severity {
    Severity::Debug
}

const fn default_console_level() -> Severity {
    Severity::Error
}

const fn default_max_file_bytes() -> u64 {
    5 * 1024 * 1024
}

const fn default_backup_count() -> usize {
    5
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            log_directory: default_log_directory(),
            file_level: default_file_level(),
            console_level: default_console_level(),
            max_file_bytes: default_max_file_bytes(),
            backup_count: default_backup_count(),
        }
    }
}

impl LoggerOptions {
    /// Same options writing under `dir`
    pub fn in_directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            log_directory: dir.into(),
            ..Self::default()
        }
    }
}
