//! Configuration management infrastructure
//!
//! - `.env` loading into a once-populated store with lookup fallback
//! - Hierarchical bootstrap settings using figment (YAML file, `APPBOOT_*` overrides)
//! - Settings validation

pub mod dotenv;
pub mod settings;

pub use dotenv::{ConfigLoader, LoadOutcome};
pub use settings::{SettingsError, SettingsLoader, DEFAULT_SETTINGS_FILE};
