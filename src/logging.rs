//! Injected observability
//!
//! Controllers report fetch lifecycle events through a [`Logger`] handed in
//! at construction, so the core stays free of implicit global side effects
//! and tests can observe exactly what happened.

use std::sync::Mutex;

/// Receiver for diagnostic events from the view controllers
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Discards everything; what the TUI wires in
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}

/// Collects events in memory; what tests wire in
#[derive(Debug, Default)]
pub struct BufferLogger {
    entries: Mutex<Vec<String>>,
}

impl BufferLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn push(&self, level: &str, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(format!("{} {}", level, message));
        }
    }
}

impl Logger for BufferLogger {
    fn info(&self, message: &str) {
        self.push("INFO", message);
    }

    fn warn(&self, message: &str) {
        self.push("WARN", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_logger_records_in_order() {
        let logger = BufferLogger::new();
        logger.info("first");
        logger.warn("second");
        assert_eq!(logger.entries(), vec!["INFO first", "WARN second"]);
    }
}
