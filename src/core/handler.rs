//! Handler trait for record sinks

use super::{error::Result, log_level::LogLevel, log_record::LogRecord};
use std::fmt;

/// A sink on a logger's handler stack
///
/// `handle` returns `Ok(true)` to stop the walk of the stack it sits on;
/// handlers below it are skipped but parent loggers still see the record.
/// Returning an error aborts the whole dispatch.
pub trait Handler: Send + Sync {
    fn is_handling(&self, level: LogLevel) -> bool;

    fn handle(&mut self, record: &LogRecord) -> Result<bool>;

    fn name(&self) -> &str;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl fmt::Debug for dyn Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.name()).finish()
    }
}
