//! Domain layer for the bootstrap facility
//!
//! This module contains the settings models, severities, error types and
//! the ports the infrastructure adapters are written against.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::{ConfigError, LoggerError};
