use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Severity of a log record.
///
/// Levels are ordered from most verbose (`Debug`) to most severe (`Critical`),
/// so a sink threshold is a plain comparison.
///
/// # Examples
///
/// ```
/// use appboot::domain::models::Severity;
///
/// assert!(Severity::Critical > Severity::Error);
/// assert!(Severity::Debug < Severity::Info);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Diagnostic detail
    #[default]
    Debug,
    /// Normal operation
    Info,
    /// Something unexpected that does not stop the caller
    #[serde(alias = "warn")]
    Warning,
    /// A failed operation
    Error,
    /// A failure the process is unlikely to survive
    Critical,
}

impl Severity {
    /// All severities, least severe first.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    /// Returns the name written into log records
    ///
    /// ```
    /// use appboot::domain::models::Severity;
    ///
    /// assert_eq!(Severity::Warning.as_str(), "WARNING");
    /// ```
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a severity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid severity: {0}. Must be one of: debug, info, warning, error, critical")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let mut shuffled = vec![
            Severity::Error,
            Severity::Debug,
            Severity::Critical,
            Severity::Info,
            Severity::Warning,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Severity::ALL.to_vec());
    }

    #[test]
    fn test_parse_severity() {
        assert_eq!("debug".parse::<Severity>(), Ok(Severity::Debug));
        assert_eq!("INFO".parse::<Severity>(), Ok(Severity::Info));
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("Warning".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("critical".parse::<Severity>(), Ok(Severity::Critical));
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_display_matches_record_name() {
        for severity in Severity::ALL {
            assert_eq!(severity.to_string(), severity.as_str());
        }
    }

    #[test]
    fn test_yaml_names() {
        let parsed: Severity = serde_yaml::from_str("warn").unwrap();
        assert_eq!(parsed, Severity::Warning);
        let rendered = serde_yaml::to_string(&Severity::Critical).unwrap();
        assert_eq!(rendered.trim(), "critical");
    }
}
