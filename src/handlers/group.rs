//! Handler that fans a record out to several handlers

use crate::core::{Handler, LogLevel, LogRecord, Result};

/// Delivers each record to every nested handler that accepts its level
///
/// The nested handlers' own stop signals are ignored; the group reports its
/// own `bubble` setting back to the logger.
pub struct GroupHandler {
    handlers: Vec<Box<dyn Handler>>,
    bubble: bool,
}

impl GroupHandler {
    pub fn new(handlers: Vec<Box<dyn Handler>>) -> Self {
        Self {
            handlers,
            bubble: true,
        }
    }

    #[must_use]
    pub fn with_bubble(mut self, bubble: bool) -> Self {
        self.bubble = bubble;
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Handler for GroupHandler {
    fn is_handling(&self, level: LogLevel) -> bool {
        self.handlers.iter().any(|handler| handler.is_handling(level))
    }

    fn handle(&mut self, record: &LogRecord) -> Result<bool> {
        for handler in self.handlers.iter_mut() {
            if handler.is_handling(record.level()) {
                handler.handle(record)?;
            }
        }
        Ok(!self.bubble)
    }

    fn name(&self) -> &str {
        "group"
    }

    fn flush(&mut self) -> Result<()> {
        for handler in self.handlers.iter_mut() {
            handler.flush()?;
        }
        Ok(())
    }
}
