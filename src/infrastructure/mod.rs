//! Infrastructure layer module
//!
//! This module contains the adapters doing real I/O:
//! - Configuration management (`.env` loading, bootstrap settings)
//! - Logging infrastructure (named loggers, rotation, diagnostics)
//! - Project root discovery and the resource search path

pub mod config;
pub mod logging;
pub mod paths;
