//! Sink layer: formats records for one destination and filters by severity

use chrono::{DateTime, Local};
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::domain::models::Severity;

/// Writer shared between every sink writing to the same destination
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Wrap a writer so several sinks can share it
pub fn shared_writer<W: Write + Send + 'static>(writer: W) -> SharedWriter {
    Arc::new(Mutex::new(writer))
}

/// Name of the field carrying the record severity
pub const SEVERITY_FIELD: &str = "severity";

/// Layer writing one line per record to a single destination
pub struct SinkLayer {
    logger_name: Arc<str>,
    threshold: Severity,
    writer: SharedWriter,
}

impl SinkLayer {
    pub fn new(logger_name: Arc<str>, threshold: Severity, writer: SharedWriter) -> Self {
        Self {
            logger_name,
            threshold,
            writer,
        }
    }
}

impl fmt::Debug for SinkLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkLayer")
            .field("logger_name", &self.logger_name)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl<S: Subscriber> Layer<S> for SinkLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let severity = visitor
            .severity
            .unwrap_or_else(|| severity_for_level(*event.metadata().level()));
        if severity < self.threshold {
            return;
        }

        let line = format_record(&Local::now(), &self.logger_name, severity, &visitor.message);

        // A failed write must never reach the caller
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if writer.write_all(line.as_bytes()).is_ok() {
            let _ = writer.flush();
        }
    }
}

/// `<timestamp> - <logger_name> - <SEVERITY> - <message>` followed by a newline
pub fn format_record(
    timestamp: &DateTime<Local>,
    logger_name: &str,
    severity: Severity,
    message: &str,
) -> String {
    format!(
        "{} - {} - {} - {}\n",
        timestamp.format("%Y-%m-%d %H:%M:%S,%3f"),
        logger_name,
        severity.as_str(),
        message
    )
}

fn severity_for_level(level: Level) -> Severity {
    if level == Level::ERROR {
        Severity::Error
    } else if level == Level::WARN {
        Severity::Warning
    } else if level == Level::INFO {
        Severity::Info
    } else {
        Severity::Debug
    }
}

#[derive(Default)]
struct RecordVisitor {
    message: String,
    severity: Option<Severity>,
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            SEVERITY_FIELD => self.severity = value.parse().ok(),
            "message" => self.message = value.to_string(),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("disk full"))
        }
    }

    #[test]
    fn test_format_record() {
        let timestamp = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let line = format_record(&timestamp, "scripts.example", Severity::Info, "hello");
        assert_eq!(
            line,
            "2024-03-09 14:05:07,000 - scripts.example - INFO - hello\n"
        );
    }

    #[test]
    fn test_threshold_filters_records() {
        let captured = Captured::default();
        let layer = SinkLayer::new(
            Arc::from("filter"),
            Severity::Warning,
            shared_writer(captured.clone()),
        );
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(severity = "INFO", "dropped");
            tracing::warn!(severity = "WARNING", "kept warning");
            tracing::error!(severity = "CRITICAL", "kept critical");
        });

        let lines = captured.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - filter - WARNING - kept warning"));
        assert!(lines[1].ends_with(" - filter - CRITICAL - kept critical"));
    }

    #[test]
    fn test_level_used_without_severity_field() {
        let captured = Captured::default();
        let layer = SinkLayer::new(Arc::from("plain"), Severity::Debug, shared_writer(captured.clone()));
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(attempt = 3, "retrying");
        });

        let lines = captured.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(" - plain - WARNING - retrying"));
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let layer = SinkLayer::new(Arc::from("broken"), Severity::Debug, shared_writer(FailingWriter));
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(severity = "ERROR", "nobody will see this");
        });
    }
}
