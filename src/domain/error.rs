use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the `.env` configuration loader
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The source exists but could not be read or parsed. The loader stays
    /// unpopulated so the load can be retried.
    #[error("Failed to load environment variables from {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// The underlying environment returned a value that could not be read
    #[error("Failed to get environment variable {name}")]
    Read {
        name: String,
        #[source]
        source: std::env::VarError,
    },

    #[error("Environment variable name cannot be empty")]
    EmptyKey,
}

impl ConfigError {
    /// Source path of a failed load, if this is one
    pub fn load_path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Load { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Errors raised while attaching sinks to a named logger
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Failed to create log directory {}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open log file {}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
