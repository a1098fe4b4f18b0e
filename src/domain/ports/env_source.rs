use std::collections::HashMap;
use std::env::VarError;

/// Port for reading the ambient environment
///
/// The configuration loader consults an `EnvSource` before its own store, so
/// variables already set in the process win over values from a `.env` file.
/// Production code uses [`ProcessEnv`]; tests and embedders can supply a
/// [`MapEnv`].
pub trait EnvSource: Send + Sync {
    /// Look up `name`.
    ///
    /// Returns `Ok(None)` when the variable is not set, and an error only when
    /// a value exists but cannot be read (for example, it is not valid Unicode).
    fn var(&self, name: &str) -> Result<Option<String>, VarError>;
}

/// Reads the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Result<Option<String>, VarError> {
        match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Fixed in-memory environment
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Result<Option<String>, VarError> {
        Ok(self.vars.get(name).cloned())
    }
}
