//! Processor trait for record transformation

use super::log_record::LogRecord;
use std::fmt;

/// A step run over a record before any handler of the owning logger sees it
///
/// Any `Fn(LogRecord) -> LogRecord + Send + Sync` closure is a processor.
///
/// # Examples
///
/// ```
/// use rust_log_dispatch::prelude::*;
///
/// let logger = Logger::new("app");
/// logger.push_processor(|record: LogRecord| record.with_extra("env", "prod"));
/// assert_eq!(logger.processors_len(), 1);
/// ```
pub trait Processor: Send + Sync {
    fn process(&self, record: LogRecord) -> LogRecord;
}

impl<F> Processor for F
where
    F: Fn(LogRecord) -> LogRecord + Send + Sync,
{
    fn process(&self, record: LogRecord) -> LogRecord {
        self(record)
    }
}

impl fmt::Debug for dyn Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Processor")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_processor_debug() {
        let processor: Box<dyn Processor> = Box::new(|record: LogRecord| record);
        assert_eq!(format!("{:?}", processor), "Processor");
    }
}
