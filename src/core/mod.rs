//! Core engine types: queue, worker, dispatch, and the public engine

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod metrics;
pub mod queue;
pub mod record;
pub mod timestamp;
pub mod worker;

pub use dispatch::{Dispatcher, SinkSelection};
pub use engine::{EngineConfig, LoggerEngine, LoggerEngineBuilder};
pub use error::{LoggerError, Result};
pub use formatter::MessageFormatter;
pub use log_level::LogLevel;
pub use metrics::EngineMetrics;
pub use queue::{BoundedLogQueue, DequeueOutcome};
pub use record::LogRecord;
pub use timestamp::TimestampFormat;
pub use worker::DispatchWorker;
