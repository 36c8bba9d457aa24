//! Dispatch and fan-out policy
//!
//! Routes each record of a drained batch to the configured sink set. One
//! mutex protects both the sink-selection value and the sinks themselves,
//! so a runtime `set_selection` is never observed mid-batch and concurrent
//! flushes cannot interleave with the worker's writes.

use super::metrics::EngineMetrics;
use super::record::LogRecord;
use crate::sinks::Sink;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Which sink(s) receive dispatched records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SinkSelection {
    #[default]
    Console,
    File,
    ConsoleAndFile,
}

impl fmt::Display for SinkSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkSelection::Console => write!(f, "console"),
            SinkSelection::File => write!(f, "file"),
            SinkSelection::ConsoleAndFile => write!(f, "console_and_file"),
        }
    }
}

struct DispatchState {
    selection: SinkSelection,
    console: Box<dyn Sink>,
    file: Box<dyn Sink>,
}

/// Fans drained batches out to the active sink set.
pub struct Dispatcher {
    state: Mutex<DispatchState>,
    metrics: Arc<EngineMetrics>,
}

impl Dispatcher {
    pub fn new(
        console: Box<dyn Sink>,
        file: Box<dyn Sink>,
        selection: SinkSelection,
        metrics: Arc<EngineMetrics>,
    ) -> Self {
        Self {
            state: Mutex::new(DispatchState {
                selection,
                console,
                file,
            }),
            metrics,
        }
    }

    pub fn selection(&self) -> SinkSelection {
        self.state.lock().selection
    }

    /// Change the sink set; takes effect with the next dispatched batch.
    pub fn set_selection(&self, selection: SinkSelection) {
        self.state.lock().selection = selection;
    }

    /// Replace the file sink, e.g. after (re)configuring the log file.
    pub fn set_file_sink(&self, file: Box<dyn Sink>) {
        self.state.lock().file = file;
    }

    /// Replace the console sink.
    pub fn set_console_sink(&self, console: Box<dyn Sink>) {
        self.state.lock().console = console;
    }

    /// Deliver a batch to the active sink set, one record at a time.
    ///
    /// For `ConsoleAndFile` the console write happens first and both writes
    /// complete before the next record is taken. A failing sink never stops
    /// the loop: the fault is reported on stderr and counted, and delivery
    /// continues with the next record.
    pub fn dispatch_batch(&self, batch: &[LogRecord]) {
        let mut state = self.state.lock();
        for record in batch {
            match state.selection {
                SinkSelection::Console => {
                    Self::write_isolated(state.console.as_mut(), record, &self.metrics);
                }
                SinkSelection::File => {
                    Self::write_isolated(state.file.as_mut(), record, &self.metrics);
                }
                SinkSelection::ConsoleAndFile => {
                    Self::write_isolated(state.console.as_mut(), record, &self.metrics);
                    Self::write_isolated(state.file.as_mut(), record, &self.metrics);
                }
            }
            self.metrics.record_dispatched();
        }
    }

    /// Write one record to one sink, containing both errors and panics.
    fn write_isolated(sink: &mut dyn Sink, record: &LogRecord, metrics: &EngineMetrics) {
        let result =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.write(record)));
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                metrics.record_sink_write_failure();
                eprintln!("[batchlog] {} sink write failed: {}", sink.name(), e);
            }
            Err(_) => {
                metrics.record_sink_write_failure();
                eprintln!(
                    "[batchlog] {} sink panicked during write, continuing with next record",
                    sink.name()
                );
            }
        }
    }

    /// Flush both sinks, returning the first error after trying each.
    pub fn flush(&self) -> crate::core::error::Result<()> {
        let mut state = self.state.lock();
        let console_result = state.console.flush();
        let file_result = state.file.flush();
        console_result.and(file_result)
    }
}
