//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level name that is neither canonical nor a known alias
    #[error("Level \"{0}\" is not defined, use one of: DEBUG, INFO, NOTICE, WARNING, ERROR, CRITICAL, ALERT, EMERGENCY")]
    UnknownLevel(String),

    /// Numeric rank outside the level table
    #[error("Level {0} is not defined")]
    UnknownRank(u16),

    /// Registry lookup for a name that is not bound
    #[error("Requested \"{0}\" logger instance is not in the registry")]
    LoggerNotFound(String),

    /// Registry insert onto a bound name without replace
    #[error("Logger with the given name \"{0}\" already exists")]
    LoggerAlreadyExists(String),

    /// Parent link that would make the logger its own ancestor
    #[error("Setting this parent on logger '{logger}' would create a cycle")]
    ParentCycle { logger: String },

    /// Pop on an empty handler stack
    #[error("You tried to pop from an empty handler stack of logger '{logger}'")]
    EmptyHandlerStack { logger: String },

    /// Pop on an empty processor stack
    #[error("You tried to pop from an empty processor stack of logger '{logger}'")]
    EmptyProcessorStack { logger: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Failure reported by a handler while delivering a record
    #[error("Handler '{handler}' failed: {message}")]
    HandlerError { handler: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an empty handler stack error
    pub fn empty_handlers(logger: impl Into<String>) -> Self {
        LoggerError::EmptyHandlerStack {
            logger: logger.into(),
        }
    }

    /// Create an empty processor stack error
    pub fn empty_processors(logger: impl Into<String>) -> Self {
        LoggerError::EmptyProcessorStack {
            logger: logger.into(),
        }
    }

    /// Create a parent cycle error
    pub fn parent_cycle(logger: impl Into<String>) -> Self {
        LoggerError::ParentCycle {
            logger: logger.into(),
        }
    }

    /// Create a handler error
    pub fn handler(handler: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HandlerError {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Caller passed a value the core cannot accept
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            LoggerError::UnknownLevel(_)
                | LoggerError::UnknownRank(_)
                | LoggerError::LoggerNotFound(_)
                | LoggerError::LoggerAlreadyExists(_)
                | LoggerError::ParentCycle { .. }
        )
    }

    /// Programmer misuse of a stack
    #[must_use]
    pub fn is_logic_error(&self) -> bool {
        matches!(
            self,
            LoggerError::EmptyHandlerStack { .. } | LoggerError::EmptyProcessorStack { .. }
        )
    }
}
