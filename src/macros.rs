//! Logging macros for ergonomic message formatting.
//!
//! These macros provide a `println!`-style interface over an engine
//! handle.
//!
//! # Examples
//!
//! ```
//! use batchlog::prelude::*;
//! use batchlog::info;
//!
//! let engine = LoggerEngine::new();
//!
//! // Basic logging
//! info!(engine, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(engine, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use batchlog::prelude::*;
/// # let engine = LoggerEngine::new();
/// use batchlog::log;
/// log!(engine, LogLevel::Info, "Simple message");
/// log!(engine, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($engine:expr, $level:expr, $($arg:tt)+) => {
        $engine.log($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Critical, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, LoggerEngine};

    #[test]
    fn test_log_macro() {
        let engine = LoggerEngine::new();
        log!(engine, LogLevel::Info, "Test message");
        log!(engine, LogLevel::Info, "Formatted: {}", 42);
        assert_eq!(engine.metrics().enqueued_count(), 2);
    }

    #[test]
    fn test_level_macros() {
        let engine = LoggerEngine::new();
        engine.set_min_level(LogLevel::Trace);
        trace!(engine, "Trace message");
        debug!(engine, "Count: {}", 5);
        info!(engine, "Items: {}", 100);
        warning!(engine, "Retry {} of {}", 1, 3);
        error!(engine, "Code: {}", 500);
        critical!(engine, "Failure: {}", "disk full");
        assert_eq!(engine.metrics().enqueued_count(), 6);
    }

    #[test]
    fn test_macros_respect_min_level() {
        let engine = LoggerEngine::new();
        trace!(engine, "filtered out");
        debug!(engine, "filtered out");
        assert_eq!(engine.metrics().enqueued_count(), 0);
    }
}
