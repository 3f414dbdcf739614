//! In-memory handler for tests and inspection

use crate::core::{Handler, LogLevel, LogRecord, Result};
use parking_lot::RwLock;
use std::sync::Arc;

/// Captures every record it handles
///
/// Clones share the captured records, so a test can keep one clone and push
/// another onto a logger.
///
/// # Example
///
/// ```
/// use rust_log_dispatch::prelude::*;
///
/// let handler = TestHandler::new();
/// let logger = Logger::builder("app").handler(handler.clone()).build();
///
/// logger.warning("disk low").unwrap();
/// assert!(handler.has_record_with_message("disk low", LogLevel::Warning));
/// assert!(handler.has_record_with_channel("app", LogLevel::Warning));
/// ```
#[derive(Debug, Clone)]
pub struct TestHandler {
    name: String,
    level: LogLevel,
    bubble: bool,
    records: Arc<RwLock<Vec<LogRecord>>>,
}

impl TestHandler {
    /// Accepts every level and lets the walk continue
    pub fn new() -> Self {
        Self::with_level(LogLevel::Debug, true)
    }

    /// `bubble == false` stops the walk of the stack after this handler
    pub fn with_level(level: LogLevel, bubble: bool) -> Self {
        Self {
            name: "test".to_string(),
            level,
            bubble,
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub fn clear(&self) {
        self.records.write().clear();
    }

    pub fn has_records(&self, level: LogLevel) -> bool {
        self.has_record_that(|_| true, level)
    }

    pub fn has_record_with_message(&self, message: &str, level: LogLevel) -> bool {
        self.has_record_that(|record| record.message() == message, level)
    }

    pub fn has_record_containing(&self, fragment: &str, level: LogLevel) -> bool {
        self.has_record_that(|record| record.message().contains(fragment), level)
    }

    /// Whether a record at `level` originated from the `channel` logger
    pub fn has_record_with_channel(&self, channel: &str, level: LogLevel) -> bool {
        self.has_record_that(|record| record.channel() == channel, level)
    }

    pub fn has_record_that<F>(&self, predicate: F, level: LogLevel) -> bool
    where
        F: Fn(&LogRecord) -> bool,
    {
        self.records
            .read()
            .iter()
            .any(|record| record.level() == level && predicate(record))
    }
}

impl Default for TestHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for TestHandler {
    fn is_handling(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn handle(&mut self, record: &LogRecord) -> Result<bool> {
        if !self.is_handling(record.level()) {
            return Ok(false);
        }
        self.records.write().push(record.clone());
        Ok(!self.bubble)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
