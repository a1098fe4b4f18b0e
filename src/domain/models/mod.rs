pub mod config;
pub mod severity;

pub use config::{BootstrapSettings, LoggerOptions};
pub use severity::{ParseSeverityError, Severity};
