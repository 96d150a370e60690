//! In-memory sink, handy for tests and embedding

use crate::types::{LogEvent, LogLevel, LogSink};
use std::sync::Mutex;

/// Keeps every emitted event in order
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<LogEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events so far
    pub fn events(&self) -> Vec<LogEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages of the events at `level`
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn emit(&self, event: LogEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
