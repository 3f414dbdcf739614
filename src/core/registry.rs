//! Name to logger lookup table
//!
//! The registry is a convenience layer outside the dispatch core: a logger
//! behaves the same whether or not it is registered. Use a local
//! [`Registry`] or the process-wide one from [`Registry::global`].
//!
//! # Example
//!
//! ```
//! use rust_log_dispatch::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Registry::new();
//! let app = Arc::new(Logger::new("app"));
//!
//! registry.add_logger(Arc::clone(&app), None, false).unwrap();
//! assert!(registry.has_logger("app"));
//! assert!(registry.has_logger(&app));
//! assert!(Arc::ptr_eq(&registry.get_instance("app").unwrap(), &app));
//! ```

use super::error::{LoggerError, Result};
use super::log_context::FieldValue;
use super::logger::Logger;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Either a registered name or a logger instance
#[derive(Debug, Clone, Copy)]
pub enum LoggerRef<'a> {
    Name(&'a str),
    Instance(&'a Arc<Logger>),
}

impl<'a> From<&'a str> for LoggerRef<'a> {
    fn from(name: &'a str) -> Self {
        LoggerRef::Name(name)
    }
}

impl<'a> From<&'a String> for LoggerRef<'a> {
    fn from(name: &'a String) -> Self {
        LoggerRef::Name(name)
    }
}

impl<'a> From<&'a Arc<Logger>> for LoggerRef<'a> {
    fn from(logger: &'a Arc<Logger>) -> Self {
        LoggerRef::Instance(logger)
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    options: RwLock<HashMap<String, FieldValue>>,
}

static GLOBAL_REGISTRY: OnceLock<Registry> = OnceLock::new();

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    pub fn global() -> &'static Registry {
        GLOBAL_REGISTRY.get_or_init(Registry::new)
    }

    /// Bind a logger under `name`, or under its own name when `None`
    ///
    /// Fails if the name is already bound and `replace` is false.
    pub fn add_logger(&self, logger: Arc<Logger>, name: Option<&str>, replace: bool) -> Result<()> {
        let name = name.unwrap_or_else(|| logger.name()).to_string();
        let mut loggers = self.loggers.write();
        if !replace && loggers.contains_key(&name) {
            return Err(LoggerError::LoggerAlreadyExists(name));
        }
        loggers.insert(name, logger);
        Ok(())
    }

    /// Whether a name is bound, or an instance is bound under any name
    pub fn has_logger<'a>(&self, target: impl Into<LoggerRef<'a>>) -> bool {
        let loggers = self.loggers.read();
        match target.into() {
            LoggerRef::Name(name) => loggers.contains_key(name),
            LoggerRef::Instance(logger) => loggers.values().any(|bound| Arc::ptr_eq(bound, logger)),
        }
    }

    /// Unbind a name, or every name an instance is bound under
    pub fn remove_logger<'a>(&self, target: impl Into<LoggerRef<'a>>) -> Result<()> {
        let mut loggers = self.loggers.write();
        match target.into() {
            LoggerRef::Name(name) => loggers
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| LoggerError::LoggerNotFound(name.to_string())),
            LoggerRef::Instance(logger) => {
                let before = loggers.len();
                loggers.retain(|_, bound| !Arc::ptr_eq(bound, logger));
                if loggers.len() == before {
                    Err(LoggerError::LoggerNotFound(logger.name().to_string()))
                } else {
                    Ok(())
                }
            }
        }
    }

    pub fn get_instance(&self, name: &str) -> Result<Arc<Logger>> {
        self.loggers
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| LoggerError::LoggerNotFound(name.to_string()))
    }

    /// Bound names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove every logger binding
    pub fn clear(&self) {
        self.loggers.write().clear();
    }

    /// Store a named option, replacing any previous value
    pub fn add_option(&self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.options.write().insert(name.into(), value.into());
    }

    /// Store a named flag set to `true`
    pub fn add_flag(&self, name: impl Into<String>) {
        self.add_option(name, true);
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.read().contains_key(name)
    }

    pub fn get_option(&self, name: &str) -> Option<FieldValue> {
        self.options.read().get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger(name: &str) -> Arc<Logger> {
        Arc::new(Logger::new(name))
    }

    #[test]
    fn test_has_logger_by_instance() {
        let registry = Registry::new();
        let logger1 = logger("test1");
        let logger2 = logger("test2");
        registry.add_logger(Arc::clone(&logger1), None, false).unwrap();

        assert!(registry.has_logger(&logger1));
        assert!(!registry.has_logger(&logger2));
    }

    #[test]
    fn test_has_logger_mixed() {
        let registry = Registry::new();
        let logger2 = logger("test2");
        let logger3 = logger("test3");
        registry.add_logger(logger("test1"), None, false).unwrap();
        registry.add_logger(Arc::clone(&logger2), None, false).unwrap();

        assert!(registry.has_logger("test1"));
        assert!(registry.has_logger(&logger2));
        assert!(!registry.has_logger("test3"));
        assert!(!registry.has_logger(&logger3));
    }

    #[test]
    fn test_instance_membership_is_identity() {
        let registry = Registry::new();
        registry.add_logger(logger("same"), None, false).unwrap();

        let lookalike = logger("same");
        assert!(registry.has_logger("same"));
        assert!(!registry.has_logger(&lookalike));
    }

    #[test]
    fn test_gets_same_logger() {
        let registry = Registry::new();
        let logger1 = logger("test1");
        let logger2 = logger("test2");
        registry.add_logger(Arc::clone(&logger1), Some("test1"), false).unwrap();
        registry.add_logger(Arc::clone(&logger2), None, false).unwrap();

        assert!(Arc::ptr_eq(&registry.get_instance("test1").unwrap(), &logger1));
        assert!(Arc::ptr_eq(&registry.get_instance("test2").unwrap(), &logger2));
    }

    #[test]
    fn test_fails_on_missing_logger() {
        let registry = Registry::new();
        let err = registry.get_instance("test1").unwrap_err();
        assert!(matches!(err, LoggerError::LoggerNotFound(_)));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_replaces_logger() {
        let registry = Registry::new();
        let log1 = logger("test1");
        let log2 = logger("test2");

        registry.add_logger(Arc::clone(&log1), Some("log"), false).unwrap();
        registry.add_logger(Arc::clone(&log2), Some("log"), true).unwrap();

        assert!(Arc::ptr_eq(&registry.get_instance("log").unwrap(), &log2));
    }

    #[test]
    fn test_fails_on_unspecified_replacement() {
        let registry = Registry::new();
        registry.add_logger(logger("test1"), Some("log"), false).unwrap();

        let err = registry.add_logger(logger("test2"), Some("log"), false).unwrap_err();
        assert!(matches!(err, LoggerError::LoggerAlreadyExists(ref name) if name == "log"));
        assert_eq!(registry.get_instance("log").unwrap().name(), "test1");
    }

    #[test]
    fn test_remove_by_name_and_instance() {
        let registry = Registry::new();
        let logger1 = logger("test1");

        registry.add_logger(Arc::clone(&logger1), None, false).unwrap();
        registry.remove_logger(&logger1).unwrap();
        assert!(registry.get_instance("test1").is_err());

        registry.add_logger(Arc::clone(&logger1), None, false).unwrap();
        registry.remove_logger("test1").unwrap();
        assert!(registry.get_instance("test1").is_err());
    }

    #[test]
    fn test_remove_instance_drops_every_binding() {
        let registry = Registry::new();
        let shared = logger("app");
        registry.add_logger(Arc::clone(&shared), None, false).unwrap();
        registry.add_logger(Arc::clone(&shared), Some("alias"), false).unwrap();

        registry.remove_logger(&shared).unwrap();
        assert!(registry.names().is_empty());
    }

    #[test]
    fn test_remove_unbound_fails() {
        let registry = Registry::new();
        assert!(registry.remove_logger("ghost").unwrap_err().is_invalid_argument());
        assert!(registry.remove_logger(&logger("ghost")).is_err());
    }

    #[test]
    fn test_clear_clears() {
        let registry = Registry::new();
        registry.add_logger(logger("test1"), Some("log"), false).unwrap();
        registry.clear();

        assert!(registry.get_instance("log").is_err());
        assert!(registry.names().is_empty());
    }

    #[test]
    fn test_options() {
        let registry = Registry::new();
        registry.add_option("option1", "string");
        registry.add_option("option2", false);
        registry.add_option("option3", 6);
        registry.add_flag("option4");

        assert!(registry.has_option("option1"));
        assert!(registry.has_option("option2"));
        assert!(registry.has_option("option3"));
        assert!(registry.has_option("option4"));
        assert!(!registry.has_option("option5"));

        assert_eq!(registry.get_option("option1"), Some(FieldValue::from("string")));
        assert_eq!(registry.get_option("option2"), Some(FieldValue::Bool(false)));
        assert_eq!(registry.get_option("option3"), Some(FieldValue::Int(6)));
        assert_eq!(registry.get_option("option4"), Some(FieldValue::Bool(true)));
        assert_eq!(registry.get_option("option5"), None);
    }
}
