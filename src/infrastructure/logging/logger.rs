use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{Dispatch, Level};
use tracing_subscriber::layer::SubscriberExt;

use super::rotation::RotatingFileWriter;
use super::sink::{shared_writer, SharedWriter, SinkLayer};
use crate::domain::error::LoggerError;
use crate::domain::models::{LoggerOptions, Severity};

/// Target attached to every record emitted through a [`LoggerHandle`]
pub const RECORD_TARGET: &str = "appboot::record";

/// Registry of named loggers.
///
/// Each name gets its sinks attached exactly once: constructing a name that
/// already exists hands back the existing logger and ignores the new options.
/// Loggers whose file names collide (same second, same directory) share one
/// rotating writer.
#[derive(Clone)]
pub struct LoggerFactory {
    state: Arc<Mutex<FactoryState>>,
    console: SharedWriter,
}

#[derive(Default)]
struct FactoryState {
    loggers: HashMap<String, LoggerHandle>,
    files: HashMap<PathBuf, SharedWriter>,
}

impl LoggerFactory {
    /// Factory whose console sinks write to standard error
    pub fn new() -> Self {
        Self::with_console(std::io::stderr())
    }

    /// Factory whose console sinks write to `console`
    pub fn with_console<W: std::io::Write + Send + 'static>(console: W) -> Self {
        Self {
            state: Arc::new(Mutex::new(FactoryState::default())),
            console: shared_writer(console),
        }
    }

    /// Get the logger called `name`, attaching its file and console sinks on first use.
    pub fn construct(
        &self,
        name: &str,
        options: &LoggerOptions,
    ) -> Result<LoggerHandle, LoggerError> {
        self.construct_at(name, options, &Local::now())
    }

    fn construct_at(
        &self,
        name: &str,
        options: &LoggerOptions,
        now: &DateTime<Local>,
    ) -> Result<LoggerHandle, LoggerError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = state.loggers.get(name) {
            return Ok(existing.clone());
        }

        ensure_directory(&options.log_directory)?;
        let log_file = options.log_directory.join(log_file_name(now));

        let file_writer = match state.files.get(&log_file) {
            Some(writer) => Arc::clone(writer),
            None => {
                let writer = RotatingFileWriter::open(
                    &log_file,
                    options.max_file_bytes,
                    options.backup_count,
                )
                .map_err(|source| LoggerError::OpenFile {
                    path: log_file.clone(),
                    source,
                })?;
                let writer = shared_writer(writer);
                state.files.insert(log_file.clone(), Arc::clone(&writer));
                writer
            }
        };

        let logger_name: Arc<str> = Arc::from(name);
        let subscriber = tracing_subscriber::registry()
            .with(SinkLayer::new(
                Arc::clone(&logger_name),
                options.file_level,
                file_writer,
            ))
            .with(SinkLayer::new(
                Arc::clone(&logger_name),
                options.console_level,
                Arc::clone(&self.console),
            ));

        let handle = LoggerHandle {
            inner: Arc::new(LoggerInner {
                name: logger_name,
                log_file,
                dispatch: Dispatch::new(subscriber),
            }),
        };
        state.loggers.insert(name.to_string(), handle.clone());

        tracing::debug!(
            logger = name,
            path = %handle.log_file().display(),
            "attached logger sinks"
        );
        Ok(handle)
    }

    /// Existing logger called `name`, without creating one
    pub fn get(&self, name: &str) -> Option<LoggerHandle> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.loggers.get(name).cloned()
    }

    /// Names of every logger constructed so far, sorted
    pub fn names(&self) -> Vec<String> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<_> = state.loggers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerFactory")
            .field("loggers", &self.names())
            .finish_non_exhaustive()
    }
}

/// A named logger. Cloning is cheap; clones share the same sinks.
#[derive(Clone)]
pub struct LoggerHandle {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    name: Arc<str>,
    log_file: PathBuf,
    dispatch: Dispatch,
}

impl LoggerHandle {
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Active log file this logger was created with
    pub fn log_file(&self) -> &Path {
        &self.inner.log_file
    }

    /// Emit `message` at `severity`. Never fails; sink write errors are dropped.
    pub fn log(&self, severity: Severity, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::dispatcher::with_default(&self.inner.dispatch, || emit(severity, message));
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Severity::Debug, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Severity::Info, message);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(Severity::Warning, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(Severity::Error, message);
    }

    pub fn critical(&self, message: impl AsRef<str>) {
        self.log(Severity::Critical, message);
    }
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("name", &self.inner.name)
            .field("log_file", &self.inner.log_file)
            .finish_non_exhaustive()
    }
}

fn emit(severity: Severity, message: &str) {
    // tracing needs the level as a constant at each callsite; the field name
    // must match `sink::SEVERITY_FIELD`
    macro_rules! record {
        ($level:expr) => {
            tracing::event!(
                target: RECORD_TARGET,
                $level,
                severity = severity.as_str(),
                "{}",
                message
            )
        };
    }

    match severity {
        Severity::Debug => record!(Level::DEBUG),
        Severity::Info => record!(Level::INFO),
        Severity::Warning => record!(Level::WARN),
        Severity::Error | Severity::Critical => record!(Level::ERROR),
    }
}

/// `log_<YYYYMMDD_HHMMSS>.log`
pub fn log_file_name(now: &DateTime<Local>) -> String {
    format!("log_{}.log", now.format("%Y%m%d_%H%M%S"))
}

fn ensure_directory(dir: &Path) -> Result<(), LoggerError> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| LoggerError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })
}
