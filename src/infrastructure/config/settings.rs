use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::BootstrapSettings;

/// Default settings file, relative to the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "appboot.yaml";

/// Prefix of environment variables overriding settings
pub const ENV_PREFIX: &str = "APPBOOT_";

/// Upper bound on `logging.max_file_bytes`
const MAX_FILE_BYTES_LIMIT: u64 = 1024 * 1024 * 1024;

/// Settings validation errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Log directory cannot be empty")]
    EmptyLogDirectory,

    #[error("Env file path cannot be empty")]
    EmptyEnvFile,

    #[error("Logger name cannot be empty")]
    EmptyLoggerName,

    #[error("Invalid max_file_bytes: {0}. Must be at most 1 GiB")]
    MaxFileBytesTooLarge(u64),
}

/// Loads [`BootstrapSettings`] with hierarchical merging
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. YAML settings file at `path` (optional)
    /// 3. Environment variables (`APPBOOT_*` prefix, `__` separates nesting)
    pub fn load(path: impl AsRef<Path>) -> Result<BootstrapSettings> {
        let path = path.as_ref();
        let settings: BootstrapSettings = Self::figment(path)
            .extract()
            .with_context(|| format!("Failed to load settings from {}", path.display()))?;

        Self::validate(&settings)?;

        tracing::debug!(
            path = %path.display(),
            file_present = path.exists(),
            env_file = %settings.env_file.display(),
            "settings loaded"
        );
        Ok(settings)
    }

    /// Load settings from a YAML string, without environment overrides
    pub fn load_from_str(yaml: &str) -> Result<BootstrapSettings> {
        let settings: BootstrapSettings = Figment::new()
            .merge(Serialized::defaults(BootstrapSettings::default()))
            .merge(Yaml::string(yaml))
            .extract()
            .context("Failed to parse settings from string")?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(BootstrapSettings::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate settings after loading
    pub fn validate(settings: &BootstrapSettings) -> Result<(), SettingsError> {
        if settings.env_file.as_os_str().is_empty() {
            return Err(SettingsError::EmptyEnvFile);
        }

        if settings.logger_name.is_empty() {
            return Err(SettingsError::EmptyLoggerName);
        }

        if settings.logging.log_directory.as_os_str().is_empty() {
            return Err(SettingsError::EmptyLogDirectory);
        }

        if settings.logging.max_file_bytes > MAX_FILE_BYTES_LIMIT {
            return Err(SettingsError::MaxFileBytesTooLarge(
                settings.logging.max_file_bytes,
            ));
        }

        Ok(())
    }

    /// Write the default settings as YAML to `path`
    pub fn create_example(path: impl AsRef<Path>) -> Result<()> {
        let yaml = serde_yaml::to_string(&BootstrapSettings::default())
            .context("Failed to serialize default settings")?;

        std::fs::write(path.as_ref(), yaml).with_context(|| {
            format!(
                "Failed to write example settings file {}",
                path.as_ref().display()
            )
        })?;

        Ok(())
    }
}
