//! Worker lifecycle controller
//!
//! Owns the single background thread that drains the queue and feeds the
//! dispatcher. The thread is started lazily by the first submitted record
//! and stopped cooperatively; stop joins the thread before returning, so
//! after `stop()` no sink can still be touched by the worker.

use super::dispatch::Dispatcher;
use super::queue::{BoundedLogQueue, DequeueOutcome};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Lifecycle controller for the dispatch thread.
///
/// At most one worker thread exists at a time; `start_if_needed` and
/// `stop` are both idempotent and race-free. The worker is one-shot per
/// engine lifetime: stopping is final and later start calls are no-ops.
pub struct DispatchWorker {
    queue: Arc<BoundedLogQueue>,
    dispatcher: Arc<Dispatcher>,
    running: AtomicBool,
    stopped: AtomicBool,
    handle: Mutex<Option<JoinHandle<()>>>,
    batch_size: usize,
    dequeue_timeout: Duration,
}

impl DispatchWorker {
    pub fn new(
        queue: Arc<BoundedLogQueue>,
        dispatcher: Arc<Dispatcher>,
        batch_size: usize,
        dequeue_timeout: Duration,
    ) -> Self {
        Self {
            queue,
            dispatcher,
            running: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            handle: Mutex::new(None),
            batch_size: batch_size.max(1),
            dequeue_timeout,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start the worker thread unless one is already running.
    ///
    /// The compare-and-set guarantees exactly one caller wins the race and
    /// spawns; everyone else returns immediately.
    pub fn start_if_needed(&self) {
        // Stopped is a final state; the queue's stop flag is already set
        // and a respawned thread would only exit again.
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let queue = Arc::clone(&self.queue);
        let dispatcher = Arc::clone(&self.dispatcher);
        let batch_size = self.batch_size;
        let dequeue_timeout = self.dequeue_timeout;

        let spawned = thread::Builder::new()
            .name("batchlog-dispatch".to_string())
            .spawn(move || {
                let mut batch = Vec::with_capacity(batch_size);
                loop {
                    batch.clear();
                    match queue.dequeue(&mut batch, batch_size, dequeue_timeout) {
                        DequeueOutcome::Batch => dispatcher.dispatch_batch(&batch),
                        DequeueOutcome::TimedOut => continue,
                        DequeueOutcome::Stopped => break,
                    }
                }
            });

        match spawned {
            Ok(handle) => {
                *self.handle.lock() = Some(handle);
            }
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                eprintln!("[batchlog] failed to spawn dispatch worker: {}", e);
            }
        }
    }

    /// Stop the worker, draining buffered records first.
    ///
    /// Only the caller that observes the true-to-false transition signals
    /// the queue and joins; all others are no-ops. The join completes
    /// before this returns.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }

        self.queue.stop();
        if let Some(handle) = self.handle.lock().take() {
            if handle.join().is_err() {
                eprintln!("[batchlog] dispatch worker panicked during shutdown");
            }
        }
    }
}

impl Drop for DispatchWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch::SinkSelection;
    use crate::core::error::Result;
    use crate::core::log_level::LogLevel;
    use crate::core::metrics::EngineMetrics;
    use crate::core::record::LogRecord;
    use crate::sinks::Sink;
    use std::time::Instant;

    struct MemorySink {
        written: Arc<Mutex<Vec<String>>>,
    }

    impl Sink for MemorySink {
        fn write(&mut self, record: &LogRecord) -> Result<()> {
            self.written.lock().push(record.line.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "memory"
        }
    }

    struct NullSink;

    impl Sink for NullSink {
        fn write(&mut self, _record: &LogRecord) -> Result<()> {
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "null"
        }
    }

    fn pipeline(capacity: usize) -> (Arc<BoundedLogQueue>, DispatchWorker, Arc<Mutex<Vec<String>>>) {
        let written = Arc::new(Mutex::new(Vec::new()));
        let console = MemorySink {
            written: Arc::clone(&written),
        };
        let queue = Arc::new(BoundedLogQueue::new(capacity));
        let dispatcher = Arc::new(Dispatcher::new(
            Box::new(console),
            Box::new(NullSink),
            SinkSelection::Console,
            Arc::new(EngineMetrics::new()),
        ));
        let worker = DispatchWorker::new(
            Arc::clone(&queue),
            dispatcher,
            8,
            Duration::from_millis(20),
        );
        (queue, worker, written)
    }

    fn wait_for_count(written: &Arc<Mutex<Vec<String>>>, expected: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while written.lock().len() < expected {
            assert!(Instant::now() < deadline, "worker never delivered records");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_worker_delivers_enqueued_records() {
        let (queue, worker, written) = pipeline(100);
        worker.start_if_needed();
        for i in 0..20 {
            queue.enqueue(LogRecord::new(LogLevel::Info, format!("m{}", i)));
        }
        wait_for_count(&written, 20);

        let got = written.lock().clone();
        let expected: Vec<String> = (0..20).map(|i| format!("m{}", i)).collect();
        assert_eq!(got, expected);
        worker.stop();
    }

    #[test]
    fn test_start_is_idempotent_under_races() {
        let (queue, worker, written) = pipeline(100);
        let worker = Arc::new(worker);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let worker = Arc::clone(&worker);
            handles.push(thread::spawn(move || worker.start_if_needed()));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(worker.is_running());

        // A single consumer means every record is delivered exactly once.
        for i in 0..50 {
            queue.enqueue(LogRecord::new(LogLevel::Info, format!("m{}", i)));
        }
        wait_for_count(&written, 50);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(written.lock().len(), 50, "records were duplicated");
        worker.stop();
    }

    #[test]
    fn test_stop_drains_remaining_records() {
        let (queue, worker, written) = pipeline(100);
        worker.start_if_needed();
        for i in 0..30 {
            queue.enqueue(LogRecord::new(LogLevel::Info, format!("m{}", i)));
        }
        worker.stop();

        // stop() joins, so everything accepted before it must be delivered.
        assert_eq!(written.lock().len(), 30);
    }

    #[test]
    fn test_stop_is_idempotent_and_blocking() {
        let (queue, worker, written) = pipeline(100);
        worker.start_if_needed();
        queue.enqueue(LogRecord::new(LogLevel::Info, "only"));
        worker.stop();
        worker.stop();
        assert!(!worker.is_running());

        // No writes can happen after stop() has returned.
        let count = written.lock().len();
        queue.enqueue(LogRecord::new(LogLevel::Info, "late"));
        thread::sleep(Duration::from_millis(100));
        assert_eq!(written.lock().len(), count);
    }

    #[test]
    fn test_stop_without_start_is_noop() {
        let (_queue, worker, _written) = pipeline(10);
        worker.stop();
        assert!(!worker.is_running());
    }

    #[test]
    fn test_start_after_stop_is_noop() {
        let (queue, worker, written) = pipeline(10);
        worker.start_if_needed();
        worker.stop();

        worker.start_if_needed();
        assert!(!worker.is_running());
        queue.enqueue(LogRecord::new(LogLevel::Info, "late"));
        thread::sleep(Duration::from_millis(50));
        assert!(written.lock().is_empty());
    }
}
