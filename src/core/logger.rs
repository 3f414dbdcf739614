//! Main logger implementation
//!
//! A [`Logger`] is a named channel owning a LIFO stack of handlers and a LIFO
//! stack of processors, with an optional non-owning link to a parent logger.
//!
//! Dispatch of one log call:
//!
//! 1. Without a parent, and with no handler of its own accepting the level,
//!    the logger returns `false` before building anything.
//! 2. Otherwise the record is built once, stamped with this logger's name as
//!    its channel.
//! 3. Each logger on the way up runs its processors (last pushed first) and
//!    walks its handlers top-down, only if one of its handlers accepts the
//!    level. A handler returning `true` ends the walk of that stack only.
//! 4. The record is then forwarded to the parent unconditionally, keeping
//!    its channel and whatever processors already wrote into it.
//!
//! The call returns whether any logger in the chain had an accepting handler.

use super::{
    clock::{self, ClockConfig},
    error::{LoggerError, Result},
    handler::Handler,
    log_context::LogContext,
    log_level::LogLevel,
    log_record::LogRecord,
    processor::Processor,
};
use parking_lot::{const_mutex, Mutex, RwLock};
use std::fmt;
use std::sync::{Arc, Weak};

type HandlerStack = Arc<RwLock<Vec<Box<dyn Handler>>>>;
type ProcessorStack = Arc<RwLock<Vec<Box<dyn Processor>>>>;

/// Serializes parent relinking so two concurrent links cannot form a cycle
static PARENT_LINKS: Mutex<()> = const_mutex(());

pub struct Logger {
    name: String,
    /// Top of stack is the last element
    handlers: HandlerStack,
    /// Top of stack is the last element
    processors: ProcessorStack,
    parent: RwLock<Option<Weak<Logger>>>,
    /// Own clock; the process-wide one is used when unset
    clock: Option<ClockConfig>,
}

impl Logger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: Arc::new(RwLock::new(Vec::new())),
            processors: Arc::new(RwLock::new(Vec::new())),
            parent: RwLock::new(None),
            clock: None,
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_log_dispatch::prelude::*;
    ///
    /// let logger = Logger::builder("app")
    ///     .handler(TestHandler::new())
    ///     .processor(|record: LogRecord| record.with_extra("env", "prod"))
    ///     .build();
    ///
    /// assert!(logger.info("ready").unwrap());
    /// ```
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A logger under another name sharing this one's handler and processor
    /// stacks, parent link and clock
    ///
    /// This logger is left untouched.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Logger {
        Logger {
            name: name.into(),
            handlers: Arc::clone(&self.handlers),
            processors: Arc::clone(&self.processors),
            parent: RwLock::new(self.parent.read().clone()),
            clock: self.clock,
        }
    }

    /// Push a handler on top of the stack
    ///
    /// The stack is locked while a record is delivered, so a handler must not
    /// call back into this logger or any logger sharing its stacks through
    /// [`Logger::with_name`]; doing so deadlocks.
    pub fn push_handler(&self, handler: Box<dyn Handler>) -> &Self {
        self.handlers.write().push(handler);
        self
    }

    /// Remove the handler on top of the stack
    pub fn pop_handler(&self) -> Result<Box<dyn Handler>> {
        self.handlers
            .write()
            .pop()
            .ok_or_else(|| LoggerError::empty_handlers(&self.name))
    }

    /// Replace the whole stack; the first handler given ends on top
    pub fn set_handlers<I>(&self, handlers: I) -> &Self
    where
        I: IntoIterator<Item = Box<dyn Handler>>,
    {
        let mut stack: Vec<Box<dyn Handler>> = handlers.into_iter().collect();
        stack.reverse();
        *self.handlers.write() = stack;
        self
    }

    /// Replace the whole stack from keyed pairs, discarding the keys
    pub fn set_keyed_handlers<K, I>(&self, handlers: I) -> &Self
    where
        I: IntoIterator<Item = (K, Box<dyn Handler>)>,
    {
        self.set_handlers(handlers.into_iter().map(|(_, handler)| handler))
    }

    /// Handler names, top of stack first
    pub fn handler_names(&self) -> Vec<String> {
        self.handlers
            .read()
            .iter()
            .rev()
            .map(|handler| handler.name().to_string())
            .collect()
    }

    pub fn handlers_len(&self) -> usize {
        self.handlers.read().len()
    }

    /// Push a processor; the last one pushed runs first
    ///
    /// Processors run while the handler stack is locked. Like handlers, they
    /// must not log through this logger or one sharing its stacks.
    pub fn push_processor<P: Processor + 'static>(&self, processor: P) -> &Self {
        self.processors.write().push(Box::new(processor));
        self
    }

    /// Remove the processor on top of the stack
    pub fn pop_processor(&self) -> Result<Box<dyn Processor>> {
        self.processors
            .write()
            .pop()
            .ok_or_else(|| LoggerError::empty_processors(&self.name))
    }

    pub fn processors_len(&self) -> usize {
        self.processors.read().len()
    }

    /// Whether any of this logger's own handlers accepts `level`
    ///
    /// Parents are not consulted.
    pub fn is_handling(&self, level: LogLevel) -> bool {
        self.handlers
            .read()
            .iter()
            .any(|handler| handler.is_handling(level))
    }

    /// Link this logger to a parent that receives every record it dispatches
    ///
    /// The link is weak: the parent must be kept alive elsewhere, and once it
    /// is dropped this logger behaves as if it had none. Linking to a logger
    /// that already has this one as an ancestor fails.
    pub fn set_parent(&self, parent: &Arc<Logger>) -> Result<&Self> {
        let _links = PARENT_LINKS.lock();
        let mut cursor = Some(Arc::clone(parent));
        while let Some(ancestor) = cursor {
            if std::ptr::eq(Arc::as_ptr(&ancestor), self) {
                return Err(LoggerError::parent_cycle(&self.name));
            }
            cursor = ancestor.parent();
        }

        *self.parent.write() = Some(Arc::downgrade(parent));
        Ok(self)
    }

    pub fn clear_parent(&self) -> &Self {
        *self.parent.write() = None;
        self
    }

    pub fn parent(&self) -> Option<Arc<Logger>> {
        self.parent.read().as_ref().and_then(Weak::upgrade)
    }

    /// Clock used to stamp records built by this logger
    pub fn clock(&self) -> ClockConfig {
        self.clock.unwrap_or_else(clock::global_clock)
    }

    /// Build a record and dispatch it through this logger and its ancestors
    ///
    /// Returns `Ok(true)` when at least one logger in the chain had a handler
    /// accepting the level.
    pub fn add_record(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
    ) -> Result<bool> {
        let parent = self.parent();
        let (mut handled, mut record) = {
            let mut handlers = self.handlers.write();
            let top = Self::top_accepting(&handlers, level);
            if parent.is_none() && top.is_none() {
                return Ok(false);
            }

            let record = LogRecord::new(self.name.as_str(), level, message, context, &self.clock());
            self.deliver(&mut handlers, top, record)?
        };

        let mut next = parent;
        while let Some(logger) = next {
            let (accepted, forwarded) = logger.handle_locally(record)?;
            handled |= accepted;
            record = forwarded;
            next = logger.parent();
        }

        Ok(handled)
    }

    /// Run this logger's processors and handlers over a record
    ///
    /// The record is handed back for forwarding, carrying whatever the
    /// processors wrote. Nothing runs if no handler accepts the level.
    fn handle_locally(&self, record: LogRecord) -> Result<(bool, LogRecord)> {
        let mut handlers = self.handlers.write();
        let top = Self::top_accepting(&handlers, record.level());
        self.deliver(&mut handlers, top, record)
    }

    /// Index of the topmost handler accepting `level`
    ///
    /// Asks each handler above it, and the handler itself, exactly once.
    fn top_accepting(handlers: &[Box<dyn Handler>], level: LogLevel) -> Option<usize> {
        handlers.iter().rposition(|handler| handler.is_handling(level))
    }

    /// Walk the stack down from `top`, the handler already known to accept
    fn deliver(
        &self,
        handlers: &mut [Box<dyn Handler>],
        top: Option<usize>,
        record: LogRecord,
    ) -> Result<(bool, LogRecord)> {
        let Some(top) = top else {
            return Ok((false, record));
        };

        let level = record.level();
        let record = self.process(record);
        if !handlers[top].handle(&record)? {
            for handler in handlers[..top].iter_mut().rev() {
                if handler.is_handling(level) && handler.handle(&record)? {
                    break;
                }
            }
        }

        Ok((true, record))
    }

    fn process(&self, record: LogRecord) -> LogRecord {
        self.processors
            .read()
            .iter()
            .rev()
            .fold(record, |record, processor| processor.process(record))
    }

    pub fn flush(&self) -> Result<()> {
        let mut handlers = self.handlers.write();
        for handler in handlers.iter_mut() {
            handler.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> Result<bool> {
        self.add_record(level, message, LogContext::new())
    }

    /// Log with structured context fields
    #[inline]
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
    ) -> Result<bool> {
        self.add_record(level, message, context)
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) -> Result<bool> {
        self.log(LogLevel::Debug, message)
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> Result<bool> {
        self.log(LogLevel::Info, message)
    }

    #[inline]
    pub fn notice(&self, message: impl Into<String>) -> Result<bool> {
        self.log(LogLevel::Notice, message)
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) -> Result<bool> {
        self.log(LogLevel::Warning, message)
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> Result<bool> {
        self.log(LogLevel::Error, message)
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) -> Result<bool> {
        self.log(LogLevel::Critical, message)
    }

    #[inline]
    pub fn alert(&self, message: impl Into<String>) -> Result<bool> {
        self.log(LogLevel::Alert, message)
    }

    #[inline]
    pub fn emergency(&self, message: impl Into<String>) -> Result<bool> {
        self.log(LogLevel::Emergency, message)
    }

    /// Alias of [`Logger::warning`]
    #[inline]
    pub fn warn(&self, message: impl Into<String>) -> Result<bool> {
        self.warning(message)
    }

    /// Alias of [`Logger::error`]
    #[inline]
    pub fn err(&self, message: impl Into<String>) -> Result<bool> {
        self.error(message)
    }

    /// Alias of [`Logger::critical`]
    #[inline]
    pub fn crit(&self, message: impl Into<String>) -> Result<bool> {
        self.critical(message)
    }

    /// Alias of [`Logger::emergency`]
    #[inline]
    pub fn emerg(&self, message: impl Into<String>) -> Result<bool> {
        self.emergency(message)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("handlers", &self.handler_names())
            .field("processors", &self.processors_len())
            .field("parent", &self.parent().map(|p| p.name.clone()))
            .field("clock", &self.clock)
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_log_dispatch::prelude::*;
/// use std::sync::Arc;
///
/// let root = Arc::new(Logger::builder("app").handler(TestHandler::new()).build());
/// let db = Logger::builder("app.db")
///     .handler(NullHandler::new(LogLevel::Emergency))
///     .clock(ClockConfig::new().with_timezone(TimeZoneSetting::Utc))
///     .parent(&root)
///     .build();
///
/// assert!(db.warning("slow query").unwrap());
/// ```
pub struct LoggerBuilder {
    name: String,
    handlers: Vec<Box<dyn Handler>>,
    processors: Vec<Box<dyn Processor>>,
    parent: Option<Weak<Logger>>,
    clock: Option<ClockConfig>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: Vec::new(),
            processors: Vec::new(),
            parent: None,
            clock: None,
        }
    }

    /// Push a handler; later calls end on top of the stack
    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Replace the handler list; the first handler given ends on top
    #[must_use = "builder methods return a new value"]
    pub fn handlers<I>(mut self, handlers: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Handler>>,
    {
        self.handlers = handlers.into_iter().collect();
        self.handlers.reverse();
        self
    }

    /// Push a processor; later calls run first
    #[must_use = "builder methods return a new value"]
    pub fn processor<P: Processor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Replace the processor list; the first processor given ends on top
    #[must_use = "builder methods return a new value"]
    pub fn processors<I>(mut self, processors: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Processor>>,
    {
        self.processors = processors.into_iter().collect();
        self.processors.reverse();
        self
    }

    /// Link to a parent logger (weakly)
    #[must_use = "builder methods return a new value"]
    pub fn parent(mut self, parent: &Arc<Logger>) -> Self {
        self.parent = Some(Arc::downgrade(parent));
        self
    }

    /// Stamp records with this clock instead of the process-wide one
    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: ClockConfig) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            name: self.name,
            handlers: Arc::new(RwLock::new(self.handlers)),
            processors: Arc::new(RwLock::new(self.processors)),
            parent: RwLock::new(self.parent),
            clock: self.clock,
        }
    }

    /// Build the Logger behind an `Arc`, ready to be a parent or registered
    pub fn build_shared(self) -> Arc<Logger> {
        Arc::new(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::TimeZoneSetting;
    use crate::core::log_context::FieldValue;
    use crate::handlers::{NullHandler, TestHandler};

    fn named(name: &str) -> Box<dyn Handler> {
        Box::new(TestHandler::new().with_name(name))
    }

    #[test]
    fn test_get_name() {
        let logger = Logger::new("foo");
        assert_eq!(logger.name(), "foo");
    }

    #[test]
    fn test_with_name_shares_stacks() {
        let first = Logger::new("first");
        first.push_handler(named("shared"));
        let second = first.with_name("second");

        assert_eq!(first.name(), "first");
        assert_eq!(second.name(), "second");
        assert_eq!(second.pop_handler().unwrap().name(), "shared");
        assert_eq!(first.handlers_len(), 0);
    }

    #[test]
    fn test_with_name_stamps_own_channel() {
        let handler = TestHandler::new();
        let first = Logger::builder("first").handler(handler.clone()).build();
        let second = first.with_name("second");

        second.info("hello").unwrap();
        assert_eq!(handler.records()[0].channel(), "second");
    }

    #[test]
    fn test_push_pop_handler() {
        let logger = Logger::new("app");
        logger.push_handler(named("h1"));
        logger.push_handler(named("h2"));

        assert_eq!(logger.pop_handler().unwrap().name(), "h2");
        assert_eq!(logger.pop_handler().unwrap().name(), "h1");

        let err = logger.pop_handler().unwrap_err();
        assert!(matches!(err, LoggerError::EmptyHandlerStack { .. }));
        assert!(err.is_logic_error());
    }

    #[test]
    fn test_set_handlers() {
        let logger = Logger::new("app");
        logger.push_handler(named("h1"));
        logger.set_handlers(vec![named("h2")]);
        assert_eq!(logger.handler_names(), vec!["h2"]);

        logger.set_keyed_handlers(vec![("AMapKey", named("h1")), ("Woop", named("h2"))]);
        assert_eq!(logger.handler_names(), vec!["h1", "h2"]);
        assert_eq!(logger.pop_handler().unwrap().name(), "h1");
    }

    #[test]
    fn test_builder_handler_lists() {
        let logger = Logger::builder("app")
            .handlers(vec![named("h1"), named("h2")])
            .build();

        assert_eq!(logger.pop_handler().unwrap().name(), "h1");
        assert_eq!(logger.pop_handler().unwrap().name(), "h2");
    }

    #[test]
    fn test_push_pop_processor() {
        let logger = Logger::new("app");
        logger.push_processor(|record: LogRecord| record.with_extra("id", 1));
        logger.push_processor(|record: LogRecord| record.with_extra("id", 2));

        let record = LogRecord::new("app", LogLevel::Info, "x", LogContext::new(), &ClockConfig::new());
        let second = logger.pop_processor().unwrap();
        assert_eq!(second.process(record.clone()).extra().get("id"), Some(&FieldValue::Int(2)));
        let first = logger.pop_processor().unwrap();
        assert_eq!(first.process(record).extra().get("id"), Some(&FieldValue::Int(1)));

        let err = logger.pop_processor().unwrap_err();
        assert!(matches!(err, LoggerError::EmptyProcessorStack { .. }));
    }

    #[test]
    fn test_processors_run_last_pushed_first() {
        let handler = TestHandler::new();
        let logger = Logger::builder("app").handler(handler.clone()).build();
        logger.push_processor(|mut record: LogRecord| {
            let message = format!("{}+first", record.message());
            record.set_message(message);
            record
        });
        logger.push_processor(|mut record: LogRecord| {
            let message = format!("{}+second", record.message());
            record.set_message(message);
            record
        });

        logger.error("test").unwrap();
        assert_eq!(handler.records()[0].message(), "test+second+first");
    }

    #[test]
    fn test_is_handling() {
        let logger = Logger::new("app");
        logger.push_handler(Box::new(NullHandler::new(LogLevel::Error)));
        assert!(!logger.is_handling(LogLevel::Debug));

        logger.push_handler(Box::new(NullHandler::new(LogLevel::Debug)));
        assert!(logger.is_handling(LogLevel::Debug));
    }

    #[test]
    fn test_log_not_handled_without_parent() {
        let handler = TestHandler::with_level(LogLevel::Error, true);
        let logger = Logger::builder("app").handler(handler.clone()).build();

        assert!(!logger.warning("test").unwrap());
        assert!(handler.records().is_empty());
    }

    #[test]
    fn test_channel_is_logger_name() {
        let handler = TestHandler::new();
        let logger = Logger::builder("foo").handler(handler.clone()).build();

        logger.warning("test").unwrap();
        assert_eq!(handler.records()[0].channel(), "foo");
    }

    #[test]
    fn test_log_methods_levels() {
        let handler = TestHandler::new();
        let logger = Logger::builder("foo").handler(handler.clone()).build();

        let last_level = || handler.records().last().map(LogRecord::level);

        logger.debug("test").unwrap();
        assert_eq!(last_level(), Some(LogLevel::Debug));
        logger.info("test").unwrap();
        assert_eq!(last_level(), Some(LogLevel::Info));
        logger.notice("test").unwrap();
        assert_eq!(last_level(), Some(LogLevel::Notice));
        logger.warning("test").unwrap();
        assert_eq!(last_level(), Some(LogLevel::Warning));
        logger.error("test").unwrap();
        assert_eq!(last_level(), Some(LogLevel::Error));
        logger.critical("test").unwrap();
        assert_eq!(last_level(), Some(LogLevel::Critical));
        logger.alert("test").unwrap();
        assert_eq!(last_level(), Some(LogLevel::Alert));
        logger.emergency("test").unwrap();
        assert_eq!(last_level(), Some(LogLevel::Emergency));

        assert!(logger.warn("test").unwrap());
        assert_eq!(last_level(), Some(LogLevel::Warning));
        assert!(logger.err("test").unwrap());
        assert_eq!(last_level(), Some(LogLevel::Error));
        assert!(logger.crit("test").unwrap());
        assert_eq!(last_level(), Some(LogLevel::Critical));
        assert!(logger.emerg("test").unwrap());
        assert_eq!(last_level(), Some(LogLevel::Emergency));
        assert_eq!(handler.records().len(), 12);
    }

    #[test]
    fn test_set_parent() {
        let parent = Arc::new(Logger::new("parent"));
        let child = Logger::new("child");
        assert!(child.parent().is_none());

        child.set_parent(&parent).unwrap();
        assert!(Arc::ptr_eq(&child.parent().unwrap(), &parent));

        child.clear_parent();
        assert!(child.parent().is_none());
    }

    #[test]
    fn test_parent_link_is_weak() {
        let child = Logger::new("child");
        {
            let parent = Arc::new(Logger::new("parent"));
            child.set_parent(&parent).unwrap();
            assert!(child.parent().is_some());
        }
        assert!(child.parent().is_none());
    }

    #[test]
    fn test_set_parent_rejects_cycles() {
        let a = Arc::new(Logger::new("a"));
        let b = Arc::new(Logger::new("b"));
        b.set_parent(&a).unwrap();

        let err = a.set_parent(&b).unwrap_err();
        assert!(matches!(err, LoggerError::ParentCycle { .. }));
        assert!(err.is_invalid_argument());
        assert!(a.set_parent(&a).is_err());
        assert!(a.parent().is_none());
    }

    #[test]
    fn test_concurrent_links_never_form_a_cycle() {
        for _ in 0..200 {
            let handler = TestHandler::new();
            let a = Arc::new(Logger::builder("a").handler(handler.clone()).build());
            let b = Arc::new(Logger::new("b"));
            let barrier = std::sync::Barrier::new(2);

            let (a_linked, b_linked) = std::thread::scope(|scope| {
                let first = scope.spawn(|| {
                    barrier.wait();
                    a.set_parent(&b).is_ok()
                });
                let second = scope.spawn(|| {
                    barrier.wait();
                    b.set_parent(&a).is_ok()
                });
                (first.join().unwrap(), second.join().unwrap())
            });

            assert_ne!(a_linked, b_linked);
            assert!(a.info("stay").unwrap());
            assert_eq!(b.info("climb").unwrap(), b_linked);
            assert_eq!(handler.has_record_with_channel("b", LogLevel::Info), b_linked);
        }
    }

    #[test]
    fn test_processor_may_log_through_unrelated_logger() {
        let audit_handler = TestHandler::new();
        let audit = Arc::new(Logger::builder("audit").handler(audit_handler.clone()).build());
        let handler = TestHandler::new();
        let logger = Logger::builder("app").handler(handler.clone()).build();

        let sink = Arc::clone(&audit);
        logger.push_processor(move |record: LogRecord| {
            let _ = sink.notice(format!("saw {}", record.message()));
            record
        });

        assert!(logger.info("order").unwrap());
        assert!(audit_handler.has_record_with_message("saw order", LogLevel::Notice));
        assert_eq!(handler.len(), 1);
    }

    #[test]
    fn test_own_clock_overrides_global() {
        let handler = TestHandler::new();
        let logger = Logger::builder("app")
            .handler(handler.clone())
            .clock(
                ClockConfig::new()
                    .with_timezone(TimeZoneSetting::Utc)
                    .with_microseconds(false),
            )
            .build();

        logger.info("tick").unwrap();
        let records = handler.records();
        let stamp = records[0].datetime();
        assert_eq!(stamp.offset().local_minus_utc(), 0);
        assert_eq!(stamp.format("%6f").to_string(), "000000");
    }

    #[test]
    fn test_debug_output() {
        let logger = Logger::builder("app").handler(TestHandler::new()).build();
        let debug = format!("{:?}", logger);
        assert!(debug.contains("\"app\""));
        assert!(debug.contains("test"));
    }
}
