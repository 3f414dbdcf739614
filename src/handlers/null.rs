//! Handler that swallows records

use crate::core::{Handler, LogLevel, LogRecord, Result};

/// Accepts records at or above its level and discards them
///
/// Placed on top of a stack it silences everything below it for the levels
/// it covers, without affecting parent loggers.
#[derive(Debug, Clone)]
pub struct NullHandler {
    level: LogLevel,
}

impl NullHandler {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }
}

impl Default for NullHandler {
    fn default() -> Self {
        Self::new(LogLevel::Debug)
    }
}

impl Handler for NullHandler {
    fn is_handling(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn handle(&mut self, record: &LogRecord) -> Result<bool> {
        Ok(self.is_handling(record.level()))
    }

    fn name(&self) -> &str {
        "null"
    }
}
