//! `.env` configuration loading with lookup fallback

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::domain::error::ConfigError;
use crate::domain::ports::{EnvSource, ProcessEnv};
use crate::infrastructure::logging::LoggerHandle;

/// Result of a [`ConfigLoader::load`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The source was read and produced this many entries
    Loaded { entries: usize },
    /// The source was missing or held no entries; the store is still marked loaded
    Empty,
    /// A previous call already populated the store; nothing was read
    AlreadyLoaded,
}

enum LoadState {
    Unloaded,
    Loaded {
        source: PathBuf,
        values: HashMap<String, String>,
    },
}

/// Loads a `.env` source once and answers lookups against it.
///
/// Lookup precedence is the ambient environment, then the loaded store, then
/// the caller's default. The ambient environment is never modified.
pub struct ConfigLoader {
    env: Box<dyn EnvSource>,
    logger: LoggerHandle,
    state: Mutex<LoadState>,
}

impl ConfigLoader {
    /// Loader backed by the process environment
    pub fn new(logger: LoggerHandle) -> Self {
        Self::with_env(ProcessEnv, logger)
    }

    /// Loader backed by `env`.
    ///
    /// `env` answers lookups only. `${VAR}` substitution inside the `.env`
    /// source is performed by dotenvy against the process environment.
    pub fn with_env(env: impl EnvSource + 'static, logger: LoggerHandle) -> Self {
        Self {
            env: Box::new(env),
            logger,
            state: Mutex::new(LoadState::Unloaded),
        }
    }

    /// Populate the store from `source_path` unless it is already populated.
    ///
    /// A missing file counts as a successful load with no entries. Lines that
    /// cannot be parsed are skipped with a warning. Any other read failure
    /// leaves the store unpopulated so the call can be retried.
    pub fn load(&self, source_path: impl AsRef<Path>) -> Result<LoadOutcome, ConfigError> {
        let path = source_path.as_ref();
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if let LoadState::Loaded { source, .. } = &*state {
            tracing::debug!(
                requested = %path.display(),
                loaded = %source.display(),
                "environment already loaded, skipping"
            );
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        match read_source(path) {
            Ok(ParsedSource { values, skipped }) => {
                for err in &skipped {
                    self.logger.warning(format!(
                        "Skipping malformed line in {}: {err}",
                        path.display()
                    ));
                }
                let outcome = if values.is_empty() {
                    self.logger.warning(format!(
                        "No environment variables found in {}",
                        path.display()
                    ));
                    LoadOutcome::Empty
                } else {
                    self.logger.info(format!(
                        "Environment variables loaded from {}",
                        path.display()
                    ));
                    LoadOutcome::Loaded {
                        entries: values.len(),
                    }
                };
                *state = LoadState::Loaded {
                    source: path.to_path_buf(),
                    values,
                };
                Ok(outcome)
            }
            Err(source) => {
                self.logger.error(format!(
                    "Error loading environment variables from {}: {source}",
                    path.display()
                ));
                Err(ConfigError::Load {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    /// Value of `name`, or `default` when it is set nowhere.
    ///
    /// Falling back to the default is logged as a warning.
    pub fn get(&self, name: &str, default: Option<&str>) -> Result<Option<String>, ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::EmptyKey);
        }

        let ambient = self.env.var(name).map_err(|source| {
            self.logger
                .error(format!("Error getting environment variable {name}: {source}"));
            ConfigError::Read {
                name: name.to_string(),
                source,
            }
        })?;

        if let Some(value) = ambient.or_else(|| self.stored(name)) {
            return Ok(Some(value));
        }

        self.logger.warning(format!(
            "Environment variable {name} not found, using default value: {}",
            default.unwrap_or("None")
        ));
        Ok(default.map(str::to_string))
    }

    /// [`get`](Self::get) with a mandatory default
    pub fn get_or(&self, name: &str, default: &str) -> Result<String, ConfigError> {
        self.get(name, Some(default))
            .map(|value| value.unwrap_or_else(|| default.to_string()))
    }

    pub fn is_loaded(&self) -> bool {
        matches!(
            *self.state.lock().unwrap_or_else(PoisonError::into_inner),
            LoadState::Loaded { .. }
        )
    }

    /// Source the store was populated from
    pub fn source_path(&self) -> Option<PathBuf> {
        match &*self.state.lock().unwrap_or_else(PoisonError::into_inner) {
            LoadState::Loaded { source, .. } => Some(source.clone()),
            LoadState::Unloaded => None,
        }
    }

    /// Number of entries read from the source (0 before loading)
    pub fn loaded_entries(&self) -> usize {
        match &*self.state.lock().unwrap_or_else(PoisonError::into_inner) {
            LoadState::Loaded { values, .. } => values.len(),
            LoadState::Unloaded => 0,
        }
    }

    fn stored(&self, name: &str) -> Option<String> {
        match &*self.state.lock().unwrap_or_else(PoisonError::into_inner) {
            LoadState::Loaded { values, .. } => values.get(name).cloned(),
            LoadState::Unloaded => None,
        }
    }
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("logger", &self.logger)
            .field("source", &self.source_path())
            .finish_non_exhaustive()
    }
}

/// Entries read from a source, plus the lines that could not be parsed
#[derive(Debug, Default)]
struct ParsedSource {
    values: HashMap<String, String>,
    skipped: Vec<dotenvy::Error>,
}

fn read_source(path: &Path) -> Result<ParsedSource, dotenvy::Error> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(err) if err.not_found() => return Ok(ParsedSource::default()),
        Err(err) => return Err(err),
    };

    let mut parsed = ParsedSource::default();
    for entry in entries {
        match entry {
            Ok((key, value)) => {
                parsed.values.insert(key, value);
            }
            // the iterator resumes at the next line after a parse error
            Err(err @ dotenvy::Error::LineParse(..)) => parsed.skipped.push(err),
            Err(err) => return Err(err),
        }
    }
    Ok(parsed)
}
