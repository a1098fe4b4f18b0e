//! Process bootstrap sequence
//!
//! Runs once from the entry point and hands the resulting objects to the
//! rest of the program instead of exposing them as globals.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::error::{ConfigError, LoggerError};
use crate::domain::models::BootstrapSettings;
use crate::domain::ports::{EnvSource, ProcessEnv};
use crate::infrastructure::config::{ConfigLoader, LoadOutcome};
use crate::infrastructure::logging::{LoggerFactory, LoggerHandle};
use crate::infrastructure::paths::SearchPath;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error(transparent)]
    Logger(#[from] LoggerError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything the application needs after bootstrap
#[derive(Debug)]
pub struct AppContext {
    pub settings: BootstrapSettings,
    pub search_path: SearchPath,
    pub loggers: LoggerFactory,
    pub logger: LoggerHandle,
    pub config: ConfigLoader,
    /// `.env` source that was loaded
    pub env_file: PathBuf,
    pub load_outcome: LoadOutcome,
}

impl AppContext {
    /// Bootstrap against the process environment with console output on stderr
    pub fn bootstrap(
        settings: BootstrapSettings,
        search_path: SearchPath,
    ) -> Result<Self, BootstrapError> {
        Self::bootstrap_with(settings, search_path, LoggerFactory::new(), ProcessEnv)
    }

    /// Bootstrap with an explicit logger factory and environment
    pub fn bootstrap_with(
        settings: BootstrapSettings,
        search_path: SearchPath,
        loggers: LoggerFactory,
        env: impl EnvSource + 'static,
    ) -> Result<Self, BootstrapError> {
        let logger = loggers.construct(&settings.logger_name, &settings.logging)?;
        let config = ConfigLoader::with_env(env, logger.clone());

        let env_file = search_path
            .resolve(&settings.env_file)
            .unwrap_or_else(|| settings.env_file.clone());
        let load_outcome = config.load(&env_file)?;

        logger.debug(format!(
            "Bootstrap complete: env file {}, search path {:?}",
            env_file.display(),
            search_path.dirs()
        ));

        Ok(Self {
            settings,
            search_path,
            loggers,
            logger,
            config,
            env_file,
            load_outcome,
        })
    }

    /// Named logger sharing this context's factory and logging options
    pub fn logger_for(&self, name: &str) -> Result<LoggerHandle, LoggerError> {
        self.loggers.construct(name, &self.settings.logging)
    }
}
