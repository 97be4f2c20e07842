//! Test log capture with structured entries and assertions.
//!
//! Capture is scoped to the current thread via `tracing::subscriber::with_default`,
//! so parallel tests never see each other's events.

use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::prelude::*;

/// A captured log entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Layer that records every event into shared storage.
pub struct CaptureLayer {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl<S> tracing_subscriber::Layer<S> for CaptureLayer
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        struct Visitor<'a> {
            message: &'a mut String,
            fields: &'a mut Vec<(String, String)>,
        }

        impl tracing::field::Visit for Visitor<'_> {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    *self.message = value.to_string();
                } else {
                    self.fields.push((field.name().to_string(), value.to_string()));
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                let value = format!("{value:?}");
                if field.name() == "message" {
                    *self.message = value;
                } else {
                    self.fields.push((field.name().to_string(), value));
                }
            }
        }

        let metadata = event.metadata();
        let mut message = String::new();
        let mut fields = Vec::new();
        event.record(&mut Visitor {
            message: &mut message,
            fields: &mut fields,
        });

        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                level: *metadata.level(),
                target: metadata.target().to_string(),
                message,
                fields,
            });
        }
    }
}

/// Run `f` with a capturing subscriber and return its value plus every event logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<LogEntry>) {
    let entries = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(CaptureLayer {
        entries: Arc::clone(&entries),
    });

    let value = tracing::subscriber::with_default(subscriber, f);
    let captured = entries.lock().map(|e| e.clone()).unwrap_or_default();
    (value, captured)
}

/// Render captured entries for assertion failure messages.
#[must_use]
pub fn format_logs(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return String::from("No logs captured");
    }
    entries
        .iter()
        .map(|e| format!("[{}] {}: {}", e.level, e.target, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assert that a captured entry with the level and message fragment exists.
#[macro_export]
macro_rules! assert_log_contains {
    ($logs:expr, $level:expr, $message:expr) => {{
        let logs = &$logs;
        let found = logs
            .iter()
            .any(|e| e.level == $level && e.message.contains($message));
        assert!(
            found,
            "Expected log with level {} containing '{}'\nCaptured logs:\n{}",
            $level,
            $message,
            $crate::test_utils::logging::format_logs(logs)
        );
    }};
}
