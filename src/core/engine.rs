//! Logger engine: the embeddable entry point
//!
//! An explicit engine object owned by the application; there is no global
//! singleton. Call sites hold (or are handed) a `LoggerEngine` and submit
//! leveled messages; the engine filters, formats, and feeds the async
//! delivery pipeline.

use super::dispatch::{Dispatcher, SinkSelection};
use super::error::Result;
use super::formatter::MessageFormatter;
use super::log_level::LogLevel;
use super::metrics::EngineMetrics;
use super::queue::BoundedLogQueue;
use super::record::LogRecord;
use super::timestamp::TimestampFormat;
use super::worker::DispatchWorker;
use crate::sinks::{ConsoleSink, FileSink};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Tunables for the delivery pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum records buffered before drop-oldest eviction kicks in.
    pub queue_capacity: usize,
    /// Maximum records drained per worker iteration.
    pub batch_size: usize,
    /// How long the worker waits for data before re-checking for shutdown.
    pub dequeue_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 10_000,
            batch_size: 64,
            dequeue_timeout: Duration::from_millis(50),
        }
    }
}

pub struct LoggerEngine {
    min_level: RwLock<LogLevel>,
    formatter: RwLock<MessageFormatter>,
    queue: Arc<BoundedLogQueue>,
    dispatcher: Arc<Dispatcher>,
    worker: DispatchWorker,
    metrics: Arc<EngineMetrics>,
}

impl LoggerEngine {
    /// Create an engine with default configuration and console output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let metrics = Arc::new(EngineMetrics::new());
        let queue = Arc::new(BoundedLogQueue::new(config.queue_capacity));
        let dispatcher = Arc::new(Dispatcher::new(
            Box::new(ConsoleSink::new()),
            Box::new(FileSink::new()),
            SinkSelection::default(),
            Arc::clone(&metrics),
        ));
        let worker = DispatchWorker::new(
            Arc::clone(&queue),
            Arc::clone(&dispatcher),
            config.batch_size,
            config.dequeue_timeout,
        );

        Self {
            min_level: RwLock::new(LogLevel::Info),
            formatter: RwLock::new(MessageFormatter::default()),
            queue,
            dispatcher,
            worker,
            metrics,
        }
    }

    /// Create a builder for the engine
    ///
    /// # Example
    /// ```
    /// use batchlog::prelude::*;
    ///
    /// let engine = LoggerEngine::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .prefix("app")
    ///     .build()
    ///     .unwrap();
    /// engine.info("ready");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerEngineBuilder {
        LoggerEngineBuilder::new()
    }

    /// Submit an already-formatted record into the delivery pipeline.
    ///
    /// This is the single entry point into the core: it lazily starts the
    /// worker, then enqueues. Never blocks and never fails; under overload
    /// the oldest buffered record is evicted instead.
    pub fn submit(&self, level: LogLevel, formatted_message: String) {
        self.worker.start_if_needed();
        if self.queue.enqueue(LogRecord::new(level, formatted_message)) {
            self.metrics.record_evicted();
        }
        self.metrics.record_enqueued();
    }

    /// Filter by severity, build the log line, and submit it.
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if level == LogLevel::Off || level < *self.min_level.read() {
            return;
        }
        let line = self.formatter.read().format_line(level, message.as_ref());
        self.submit(level, line);
    }

    #[inline]
    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Critical, message);
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.formatter.write().set_prefix(prefix);
    }

    pub fn sink_selection(&self) -> SinkSelection {
        self.dispatcher.selection()
    }

    /// Change the sink set at runtime; applies from the next batch.
    pub fn set_sink_selection(&self, selection: SinkSelection) {
        self.dispatcher.set_selection(selection);
    }

    /// Configure the file sink.
    ///
    /// Rotation is enabled when both `max_size_bytes` and `max_file_count`
    /// are non-zero.
    pub fn setup_file(
        &self,
        path: impl Into<PathBuf>,
        max_size_bytes: u64,
        max_file_count: usize,
    ) -> Result<()> {
        let mut sink = FileSink::new();
        sink.setup(path, max_size_bytes, max_file_count)?;
        self.dispatcher.set_file_sink(Box::new(sink));
        Ok(())
    }

    /// Force both sinks to flush buffered output.
    pub fn flush(&self) -> Result<()> {
        self.dispatcher.flush()
    }

    /// Stop the worker (draining buffered records) and flush the sinks.
    ///
    /// After this returns the background thread is joined and no further
    /// sink writes occur. Idempotent.
    pub fn shutdown(&self) -> Result<()> {
        self.worker.stop();
        self.flush()
    }

    /// Pipeline counters for observability.
    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }
}

impl Default for LoggerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LoggerEngine {
    fn drop(&mut self) {
        // Stop first: the worker must be joined before sinks go away.
        self.worker.stop();
        if let Err(e) = self.dispatcher.flush() {
            eprintln!("[batchlog] failed to flush during shutdown: {}", e);
        }

        let evicted = self.metrics.evicted_count();
        if evicted > 0 {
            eprintln!(
                "[batchlog] engine shutting down with {} evicted records (eviction rate: {:.2}%)",
                evicted,
                self.metrics.eviction_rate()
            );
        }
    }
}

/// Builder for constructing a `LoggerEngine` with a fluent API
///
/// # Example
/// ```no_run
/// use batchlog::prelude::*;
///
/// let engine = LoggerEngine::builder()
///     .min_level(LogLevel::Debug)
///     .prefix("worker-7")
///     .sink_selection(SinkSelection::ConsoleAndFile)
///     .file("/var/log/app.log", 10 * 1024 * 1024, 5)
///     .queue_capacity(50_000)
///     .build()
///     .unwrap();
/// ```
pub struct LoggerEngineBuilder {
    min_level: LogLevel,
    prefix: String,
    timestamp_format: TimestampFormat,
    selection: SinkSelection,
    config: EngineConfig,
    console_colors: bool,
    file: Option<(PathBuf, u64, usize)>,
}

impl LoggerEngineBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            prefix: String::new(),
            timestamp_format: TimestampFormat::default(),
            selection: SinkSelection::default(),
            config: EngineConfig::default(),
            console_colors: true,
            file: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink_selection(mut self, selection: SinkSelection) -> Self {
        self.selection = selection;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn dequeue_timeout(mut self, timeout: Duration) -> Self {
        self.config.dequeue_timeout = timeout;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_colors(mut self, use_colors: bool) -> Self {
        self.console_colors = use_colors;
        self
    }

    /// Configure the file sink target and rotation limits.
    #[must_use = "builder methods return a new value"]
    pub fn file(
        mut self,
        path: impl Into<PathBuf>,
        max_size_bytes: u64,
        max_file_count: usize,
    ) -> Self {
        self.file = Some((path.into(), max_size_bytes, max_file_count));
        self
    }

    /// Build the engine; fails only if the configured log file cannot be
    /// opened.
    pub fn build(self) -> Result<LoggerEngine> {
        let engine = LoggerEngine::with_config(self.config);
        engine.set_min_level(self.min_level);
        *engine.formatter.write() = MessageFormatter::new(self.prefix, self.timestamp_format);
        engine.set_sink_selection(self.selection);
        if !self.console_colors {
            engine
                .dispatcher
                .set_console_sink(Box::new(ConsoleSink::with_colors(false)));
        }
        if let Some((path, max_size_bytes, max_file_count)) = self.file {
            engine.setup_file(path, max_size_bytes, max_file_count)?;
        }
        Ok(engine)
    }
}

impl Default for LoggerEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
