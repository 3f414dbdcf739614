//! Output format configuration for log records
//!
//! Provides different line formats for handlers that write text:
//! - Text: Human-readable format (default)
//! - Json: Machine-readable JSON format
//! - Logfmt: Key-value format compatible with log aggregation tools

use super::error::Result;
use super::log_context::{FieldValue, LogContext};
use super::log_record::LogRecord;
use super::timestamp::TimestampFormat;

/// Output format for log records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `[2025-01-08T10:30:45.123+00:00] app.INFO: Request processed {"user":"ada"} []`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"channel":"app","datetime":"2025-01-08T10:30:45.123+00:00","level":200,...}`
    Json,

    /// Logfmt format (key=value pairs)
    ///
    /// Example: `datetime=2025-01-08T10:30:45.123+00:00 channel=app level=INFO message="Request processed"`
    Logfmt,
}

impl OutputFormat {
    /// Format a record according to this output format
    pub fn format(&self, record: &LogRecord, timestamp_format: &TimestampFormat) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(self.format_text(record, timestamp_format)),
            OutputFormat::Json => self.format_json(record, timestamp_format),
            OutputFormat::Logfmt => Ok(self.format_logfmt(record, timestamp_format)),
        }
    }

    fn format_text(&self, record: &LogRecord, timestamp_format: &TimestampFormat) -> String {
        format!(
            "[{}] {}.{}: {} {} {}",
            timestamp_format.format(record.datetime()),
            record.channel(),
            record.level_name(),
            record.message(),
            Self::text_fields(record.context()),
            Self::text_fields(record.extra()),
        )
    }

    fn text_fields(fields: &LogContext) -> String {
        if fields.is_empty() {
            "[]".to_string()
        } else {
            fields.to_json_value().to_string()
        }
    }

    fn format_json(&self, record: &LogRecord, timestamp_format: &TimestampFormat) -> Result<String> {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            "datetime".to_string(),
            timestamp_format.to_json_value(record.datetime()),
        );
        json_obj.insert(
            "channel".to_string(),
            serde_json::Value::String(record.channel().to_string()),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::Number(record.level().rank().into()),
        );
        json_obj.insert(
            "level_name".to_string(),
            serde_json::Value::String(record.level_name().to_string()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(record.message().to_string()),
        );
        json_obj.insert("context".to_string(), record.context().to_json_value());
        json_obj.insert("extra".to_string(), record.extra().to_json_value());

        Ok(serde_json::to_string(&serde_json::Value::Object(json_obj))?)
    }

    fn format_logfmt(&self, record: &LogRecord, timestamp_format: &TimestampFormat) -> String {
        let mut parts = vec![
            format!(
                "datetime={}",
                self.escape_logfmt_value(&timestamp_format.format(record.datetime()))
            ),
            format!("channel={}", self.escape_logfmt_value(record.channel())),
            format!("level={}", record.level_name()),
            // Message is always quoted
            format!("message={}", self.quote_logfmt_value(record.message())),
        ];

        for (key, value) in record.context().iter().chain(record.extra().iter()) {
            let formatted_value = match value {
                FieldValue::String(s) => self.quote_logfmt_value(s),
                other => self.escape_logfmt_value(&other.to_string()),
            };
            parts.push(format!("{}={}", self.escape_logfmt_key(key), formatted_value));
        }

        parts.join(" ")
    }

    /// Escape a logfmt key (remove spaces and special chars)
    fn escape_logfmt_key(&self, key: &str) -> String {
        key.chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
            .collect()
    }

    /// Escape a logfmt value (quote if contains spaces)
    fn escape_logfmt_value(&self, value: &str) -> String {
        if value.contains(' ') || value.contains('"') || value.contains('=') {
            self.quote_logfmt_value(value)
        } else {
            value.to_string()
        }
    }

    fn quote_logfmt_value(&self, value: &str) -> String {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
