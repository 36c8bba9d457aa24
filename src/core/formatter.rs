//! Log line construction
//!
//! Builds the final `[timestamp] [prefix] [LEVEL] message` line that the
//! delivery pipeline treats as an opaque payload.

use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;

/// Builds formatted log lines from level, prefix, and message.
#[derive(Debug, Clone, Default)]
pub struct MessageFormatter {
    prefix: String,
    timestamp_format: TimestampFormat,
}

impl MessageFormatter {
    pub fn new(prefix: impl Into<String>, timestamp_format: TimestampFormat) -> Self {
        Self {
            prefix: prefix.into(),
            timestamp_format,
        }
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Sanitize a log message to prevent log injection
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a message cannot masquerade as additional log lines.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Build the complete log line for a message.
    pub fn format_line(&self, level: LogLevel, message: &str) -> String {
        let timestamp = self.timestamp_format.now();
        let message = Self::sanitize_message(message);

        if self.prefix.is_empty() {
            format!("[{}] [{}] {}", timestamp, level.to_str(), message)
        } else {
            format!(
                "[{}] [{}] [{}] {}",
                timestamp,
                self.prefix,
                level.to_str(),
                message
            )
        }
    }
}
