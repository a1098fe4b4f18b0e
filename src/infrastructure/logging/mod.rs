//! Logging infrastructure
//!
//! Named loggers built on tracing and tracing-subscriber:
//! - One file sink and one console sink per logger, each with its own threshold
//! - Size-based log file rotation
//! - Process-wide diagnostics subscriber for library internals

pub mod diagnostics;
pub mod logger;
pub mod rotation;
pub mod sink;

pub use diagnostics::init_diagnostics;
pub use logger::{log_file_name, LoggerFactory, LoggerHandle};
pub use rotation::RotatingFileWriter;
