//! Log record carried through the delivery pipeline

use super::log_level::LogLevel;

/// A fully formatted log line, ready for delivery.
///
/// Level filtering, timestamping, and prefixing all happen before a record
/// is created; the queue and worker move the line around as an opaque
/// payload. The level rides along only so the console sink can choose its
/// color and output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub line: String,
}

impl LogRecord {
    pub fn new(level: LogLevel, line: impl Into<String>) -> Self {
        Self {
            level,
            line: line.into(),
        }
    }
}
