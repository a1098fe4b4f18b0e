//! Appboot - application bootstrap
//!
//! Appboot loads `.env` configuration once per process and hands out named
//! loggers that write to a size-rotated log file and to the console, each with
//! its own severity threshold.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): settings models, severities, errors and ports
//! - **Application Layer** (`application`): the bootstrap sequence and the example workflow
//! - **Infrastructure Layer** (`infrastructure`): `.env` loading, settings, logging, search path
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use appboot::{ConfigLoader, LoggerFactory, LoggerOptions};
//!
//! fn main() -> anyhow::Result<()> {
//!     let loggers = LoggerFactory::new();
//!     let logger = loggers.construct("scripts.example", &LoggerOptions::default())?;
//!
//!     let config = ConfigLoader::new(logger.clone());
//!     config.load(".env")?;
//!
//!     let number1: i64 = config.get_or("NUMBER1", "10")?.parse()?;
//!     logger.info(format!("NUMBER1={number1}"));
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use application::{add_numbers, AppContext, BootstrapError, SumReport, WorkflowError};
pub use domain::models::{BootstrapSettings, LoggerOptions, Severity};
pub use domain::ports::{EnvSource, MapEnv, ProcessEnv};
pub use domain::{ConfigError, LoggerError};
pub use infrastructure::config::{ConfigLoader, LoadOutcome, SettingsError, SettingsLoader};
pub use infrastructure::logging::{LoggerFactory, LoggerHandle};
pub use infrastructure::paths::{discover_project_root, SearchPath};
