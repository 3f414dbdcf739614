//! # Rust Log Dispatch
//!
//! The dispatch core of a channel-based structured logger.
//!
//! A [`Logger`] is a named channel holding a stack of handlers and a stack
//! of processors. Loggers can be chained to a parent; records climb the chain
//! after the local handlers have run, keeping the channel of the logger where
//! the call originated.
//!
//! ## Features
//!
//! - **Severity levels**: the eight RFC 5424 levels with fixed numeric ranks
//! - **Handler stacks**: top-first delivery with per-handler stop signals
//! - **Processors**: LIFO record enrichment, closures included
//! - **Hierarchies**: child loggers forward to parents without cycles
//! - **Registry**: optional name lookup, local or process-wide
//!
//! ## Example
//!
//! ```
//! use rust_log_dispatch::prelude::*;
//!
//! let app = Logger::builder("app").handler(TestHandler::new()).build_shared();
//! let db = Logger::builder("app.db").parent(&app).build();
//!
//! assert!(db.warning("slow query").unwrap());
//! ```

pub mod core;
pub mod handlers;
pub mod macros;
pub mod processors;

pub mod prelude {
    pub use crate::core::{
        global_clock, set_timezone, to_level_rank, use_microsecond_timestamps, ClockConfig,
        FieldValue, Handler, LogContext, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerError,
        OutputFormat, Processor, Registry, Result, TimeZoneSetting, TimestampFormat,
    };
    #[cfg(feature = "console")]
    pub use crate::handlers::ConsoleHandler;
    pub use crate::handlers::{GroupHandler, NullHandler, TestHandler};
    pub use crate::processors::{TagProcessor, ThreadProcessor, UidProcessor};
}

pub use crate::core::{
    global_clock, set_global_clock, set_timezone, to_level_rank, use_microsecond_timestamps,
    ClockConfig, FieldValue, Handler, LevelValue, LogContext, LogLevel, LogRecord, Logger,
    LoggerBuilder, LoggerError, LoggerRef, OutputFormat, Processor, Registry, Result,
    TimeZoneSetting, TimestampFormat,
};
