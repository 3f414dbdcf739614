//! Rendering of record timestamps
//!
//! Formats keep the record's own offset, so a record stamped in `+05:30`
//! prints in `+05:30`.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// How a handler writes a record's `datetime`
///
/// # Examples
///
/// ```
/// use rust_log_dispatch::TimestampFormat;
/// use chrono::DateTime;
///
/// let stamp = DateTime::parse_from_rfc3339("2025-01-08T10:30:45.123456+02:00").unwrap();
/// assert_eq!(TimestampFormat::Iso8601.format(&stamp), "2025-01-08T10:30:45.123+02:00");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123+00:00`
    #[default]
    Iso8601,

    /// `2025-01-08T10:30:45.123456+00:00`
    Iso8601Micros,

    /// chrono's RFC 3339 rendering, all stored sub-second digits
    Rfc3339,

    /// Seconds since the epoch
    Unix,

    UnixMillis,
    UnixMicros,

    /// Any chrono strftime pattern, e.g. `"%d/%b/%Y:%H:%M:%S %z"`
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<FixedOffset>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimestampFormat::Iso8601Micros => {
                datetime.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string()
            }
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// JSON representation: numbers for Unix formats, strings otherwise
    #[must_use]
    pub fn to_json_value(&self, datetime: &DateTime<FixedOffset>) -> serde_json::Value {
        match self {
            TimestampFormat::Unix => datetime.timestamp().into(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().into(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().into(),
            _ => serde_json::Value::String(self.format(datetime)),
        }
    }
}
