//! Core logger types and traits

pub mod clock;
pub mod error;
pub mod handler;
pub mod log_context;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod output_format;
pub mod processor;
pub mod registry;
pub mod timestamp;

pub use clock::{
    global_clock, set_global_clock, set_timezone, use_microsecond_timestamps, ClockConfig,
    TimeZoneSetting,
};
pub use error::{LoggerError, Result};
pub use handler::Handler;
pub use log_context::{FieldValue, LogContext};
pub use log_level::{to_level_rank, LevelValue, LogLevel};
pub use log_record::LogRecord;
pub use logger::{Logger, LoggerBuilder};
pub use output_format::OutputFormat;
pub use processor::Processor;
pub use registry::{LoggerRef, Registry};
pub use timestamp::TimestampFormat;
