//! JSONL file writer for session events.
//!
//! Each [`SessionEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.

use coach_application::{SessionEvent, SessionEventSink};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL session event logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlEventLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn describe(event: &SessionEvent) -> (&'static str, serde_json::Value) {
        match event {
            SessionEvent::GuessRecorded { session_id, record } => (
                "guess_recorded",
                serde_json::json!({
                    "session_id": session_id,
                    "record": record,
                }),
            ),
            SessionEvent::GameFinished { session_id, solved } => (
                "game_finished",
                serde_json::json!({
                    "session_id": session_id,
                    "solved": solved,
                }),
            ),
            SessionEvent::GameRecorded { record } => (
                "game_recorded",
                serde_json::json!({ "record": record }),
            ),
            SessionEvent::RecommendationShown {
                provider_used,
                words,
            } => (
                "recommendation_shown",
                serde_json::json!({
                    "provider": provider_used,
                    "words": words,
                }),
            ),
            SessionEvent::RecommendationCleared => {
                ("recommendation_cleared", serde_json::json!({}))
            }
            SessionEvent::SessionReset { session_id } => (
                "session_reset",
                serde_json::json!({ "session_id": session_id }),
            ),
        }
    }
}

impl SessionEventSink for JsonlEventLogger {
    fn emit(&self, event: SessionEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let (event_type, payload) = Self::describe(&event);

        // Merge payload with type + timestamp
        let record = if let serde_json::Value::Object(mut map) = payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event_type.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": event_type,
                "timestamp": timestamp,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // Flush every line for crash safety, the log is append-only
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlEventLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
