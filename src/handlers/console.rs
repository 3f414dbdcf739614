//! Console handler writing formatted records to stdout and stderr

use crate::core::{Handler, LogLevel, LogRecord, OutputFormat, Result, TimestampFormat};
use colored::Colorize;
use std::io::Write;

/// Writes one line per record
///
/// Records at `Error` or above go to stderr, everything else to stdout.
pub struct ConsoleHandler {
    level: LogLevel,
    bubble: bool,
    use_colors: bool,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self::with_level(LogLevel::Debug)
    }

    pub fn with_level(level: LogLevel) -> Self {
        Self {
            level,
            bubble: true,
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        }
    }

    #[must_use]
    pub fn with_bubble(mut self, bubble: bool) -> Self {
        self.bubble = bubble;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// # Example
    ///
    /// ```
    /// use rust_log_dispatch::handlers::ConsoleHandler;
    /// use rust_log_dispatch::OutputFormat;
    ///
    /// let handler = ConsoleHandler::new().with_output_format(OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Strftime pattern, e.g. `"%d/%b/%Y:%H:%M:%S %z"`
    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        self
    }

    /// Render a record the way it will be written
    pub fn render(&self, record: &LogRecord) -> Result<String> {
        match self.output_format {
            OutputFormat::Text if self.use_colors => self.render_colored(record),
            _ => self.output_format.format(record, &self.timestamp_format),
        }
    }

    fn render_colored(&self, record: &LogRecord) -> Result<String> {
        let plain = OutputFormat::Text.format(record, &self.timestamp_format)?;
        let tag = format!("{}.{}:", record.channel(), record.level_name());
        let colored_tag = format!(
            "{}.{}:",
            record.channel(),
            record.level_name().color(record.level().color_code())
        );
        Ok(plain.replacen(&tag, &colored_tag, 1))
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn is_handling(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn handle(&mut self, record: &LogRecord) -> Result<bool> {
        if !self.is_handling(record.level()) {
            return Ok(false);
        }
        let line = self.render(record)?;
        if record.level() >= LogLevel::Error {
            writeln!(std::io::stderr().lock(), "{}", line)?;
        } else {
            writeln!(std::io::stdout().lock(), "{}", line)?;
        }
        Ok(!self.bubble)
    }

    fn name(&self) -> &str {
        "console"
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}

impl Drop for ConsoleHandler {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush console handler: {}", e);
        }
    }
}
