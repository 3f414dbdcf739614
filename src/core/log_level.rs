//! Log level definitions

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a record. Ranks are stable and strictly ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[repr(u16)]
pub enum LogLevel {
    /// Detailed debug information
    Debug = 100,
    /// Interesting events
    #[default]
    Info = 200,
    /// Uncommon events
    Notice = 250,
    /// Exceptional occurrences that are not errors
    Warning = 300,
    /// Runtime errors
    Error = 400,
    /// Critical conditions
    Critical = 500,
    /// Action must be taken immediately
    Alert = 550,
    /// Urgent alert
    Emergency = 600,
}

impl LogLevel {
    /// Every level, least severe first
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Notice,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::Alert,
        LogLevel::Emergency,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Notice => "NOTICE",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Alert => "ALERT",
            LogLevel::Emergency => "EMERGENCY",
        }
    }

    #[inline]
    pub fn rank(&self) -> u16 {
        *self as u16
    }

    pub fn from_rank(rank: u16) -> Result<Self> {
        match rank {
            100 => Ok(LogLevel::Debug),
            200 => Ok(LogLevel::Info),
            250 => Ok(LogLevel::Notice),
            300 => Ok(LogLevel::Warning),
            400 => Ok(LogLevel::Error),
            500 => Ok(LogLevel::Critical),
            550 => Ok(LogLevel::Alert),
            600 => Ok(LogLevel::Emergency),
            _ => Err(LoggerError::UnknownRank(rank)),
        }
    }

    /// Canonical name for a numeric rank
    pub fn name_of(rank: u16) -> Result<&'static str> {
        Self::from_rank(rank).map(|level| level.to_str())
    }

    /// Numeric rank for a canonical name or PSR-style alias
    pub fn rank_of(name: &str) -> Result<u16> {
        name.parse::<LogLevel>().map(|level| level.rank())
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => BrightBlack,
            LogLevel::Info => Green,
            LogLevel::Notice => Cyan,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
            LogLevel::Critical => BrightRed,
            LogLevel::Alert => Magenta,
            LogLevel::Emergency => BrightMagenta,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "NOTICE" => Ok(LogLevel::Notice),
            "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            "ALERT" => Ok(LogLevel::Alert),
            "EMERGENCY" => Ok(LogLevel::Emergency),
            _ => Err(LoggerError::UnknownLevel(s.to_string())),
        }
    }
}

impl TryFrom<u16> for LogLevel {
    type Error = LoggerError;

    fn try_from(rank: u16) -> Result<Self> {
        Self::from_rank(rank)
    }
}

/// Anything accepted by the level-conversion interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelValue {
    Level(LogLevel),
    Rank(u16),
    Name(String),
}

impl From<LogLevel> for LevelValue {
    fn from(level: LogLevel) -> Self {
        LevelValue::Level(level)
    }
}

impl From<u16> for LevelValue {
    fn from(rank: u16) -> Self {
        LevelValue::Rank(rank)
    }
}

impl From<&str> for LevelValue {
    fn from(name: &str) -> Self {
        LevelValue::Name(name.to_string())
    }
}

impl From<String> for LevelValue {
    fn from(name: String) -> Self {
        LevelValue::Name(name)
    }
}

impl LevelValue {
    pub fn to_level(&self) -> Result<LogLevel> {
        match self {
            LevelValue::Level(level) => Ok(*level),
            LevelValue::Rank(rank) => LogLevel::from_rank(*rank),
            LevelValue::Name(name) => name.parse(),
        }
    }
}

/// Convert a level name, rank or level into its canonical numeric rank
///
/// # Examples
///
/// ```
/// use rust_log_dispatch::{to_level_rank, LogLevel};
///
/// assert_eq!(to_level_rank("warning").unwrap(), 300);
/// assert_eq!(to_level_rank(550u16).unwrap(), 550);
/// assert_eq!(to_level_rank(LogLevel::Emergency).unwrap(), 600);
/// assert!(to_level_rank("loud").is_err());
/// ```
pub fn to_level_rank(value: impl Into<LevelValue>) -> Result<u16> {
    value.into().to_level().map(|level| level.rank())
}
