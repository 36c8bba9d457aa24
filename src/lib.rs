//! # Batchlog
//!
//! An embeddable logging library built around an asynchronous delivery
//! pipeline: a bounded, drop-oldest message queue, a single background
//! worker thread that drains records in batches, and a sink fan-out
//! policy covering console and file output.
//!
//! ## Features
//!
//! - **Non-blocking hot path**: producers never wait; under overload the
//!   oldest buffered record is evicted (freshness over completeness)
//! - **Single worker thread**: lazy start, cooperative stop with a full
//!   drain of buffered records
//! - **Console / file fan-out**: sink set switchable at runtime, size-based
//!   file rotation
//! - **No global state**: the engine is an explicit object owned by the
//!   application

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        BoundedLogQueue, DequeueOutcome, Dispatcher, EngineConfig, EngineMetrics, LogLevel,
        LogRecord, LoggerEngine, LoggerEngineBuilder, LoggerError, Result, SinkSelection,
        TimestampFormat,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, Sink};
}

pub use crate::core::{
    BoundedLogQueue, DequeueOutcome, Dispatcher, EngineConfig, EngineMetrics, LogLevel, LogRecord,
    LoggerEngine, LoggerEngineBuilder, LoggerError, MessageFormatter, Result, SinkSelection,
    TimestampFormat,
};
pub use crate::sinks::{ConsoleSink, FileSink, Sink};
