//! Log record structure

use super::clock::ClockConfig;
use super::log_context::{FieldValue, LogContext};
use super::log_level::LogLevel;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One log event, built once by the logger where the call originated
///
/// `channel`, `level` and `datetime` are fixed at construction. Processors may
/// rewrite the message and add to `context` or `extra`; handlers only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    channel: String,
    level: LogLevel,
    message: String,
    context: LogContext,
    extra: LogContext,
    datetime: DateTime<FixedOffset>,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(
        channel: impl Into<String>,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
        clock: &ClockConfig,
    ) -> Self {
        Self::at(channel, level, message, context, clock.now())
    }

    /// Build a record with an explicit timestamp
    pub fn at(
        channel: impl Into<String>,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
        datetime: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            channel: channel.into(),
            level,
            message: Self::sanitize_message(&message.into()),
            context,
            extra: LogContext::new(),
            datetime,
        }
    }

    /// Name of the logger the record originated from
    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn level_name(&self) -> &'static str {
        self.level.to_str()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Self::sanitize_message(&message.into());
    }

    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut LogContext {
        &mut self.context
    }

    pub fn extra(&self) -> &LogContext {
        &self.extra
    }

    pub fn extra_mut(&mut self) -> &mut LogContext {
        &mut self.extra
    }

    /// Add an extra field, consuming and returning the record
    #[must_use]
    pub fn with_extra<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.extra.insert(key, value);
        self
    }

    pub fn datetime(&self) -> &DateTime<FixedOffset> {
        &self.datetime
    }
}
