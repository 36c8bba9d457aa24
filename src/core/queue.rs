//! Bounded drop-oldest message queue
//!
//! Thread-safe FIFO buffer between producer threads and the dispatch
//! worker. When full, the oldest record is evicted to admit the new one:
//! producers never block and never fail. A condition variable wakes the
//! worker on every enqueue and on stop.

use super::record::LogRecord;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::Duration;

/// Result of a [`BoundedLogQueue::dequeue`] call.
///
/// The worker must distinguish an idle timeout from shutdown: a timeout
/// means "loop and retry", while `Stopped` is only returned once stop has
/// been requested and every buffered record has been drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeueOutcome {
    /// At least one record was moved into the output batch.
    Batch,
    /// The timeout elapsed with no data and no stop request.
    TimedOut,
    /// Stop was requested and the queue is empty; the caller should exit.
    Stopped,
}

struct QueueState {
    records: VecDeque<LogRecord>,
    stop_requested: bool,
}

/// Bounded, mutex-protected FIFO of formatted log records.
pub struct BoundedLogQueue {
    capacity: usize,
    state: Mutex<QueueState>,
    data_available: Condvar,
}

impl BoundedLogQueue {
    /// Create a queue holding at most `capacity` records.
    pub fn new(capacity: usize) -> Self {
        // A zero capacity queue could never hand anything to the worker.
        let capacity = capacity.max(1);
        Self {
            capacity,
            state: Mutex::new(QueueState {
                records: VecDeque::with_capacity(capacity.min(1024)),
                stop_requested: false,
            }),
            data_available: Condvar::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }

    /// Append a record, evicting the oldest one if the queue is full.
    ///
    /// Never blocks beyond the short critical section and never fails;
    /// records are still accepted after [`stop`](Self::stop) so a late
    /// producer cannot observe an error. Returns `true` if an older record
    /// was evicted to make room.
    pub fn enqueue(&self, record: LogRecord) -> bool {
        let mut state = self.state.lock();
        let evicted = if state.records.len() >= self.capacity {
            state.records.pop_front();
            true
        } else {
            false
        };
        state.records.push_back(record);
        drop(state);
        self.data_available.notify_one();
        evicted
    }

    /// Move up to `max_batch_size` records from the head into `out`.
    ///
    /// Blocks until data arrives, stop is requested, or `timeout` elapses.
    /// FIFO order is preserved both in the returned batch and in the
    /// remainder.
    pub fn dequeue(
        &self,
        out: &mut Vec<LogRecord>,
        max_batch_size: usize,
        timeout: Duration,
    ) -> DequeueOutcome {
        let mut state = self.state.lock();
        let timed_out = self
            .data_available
            .wait_while_for(
                &mut state,
                |s| s.records.is_empty() && !s.stop_requested,
                timeout,
            )
            .timed_out();

        // Stop only terminates the caller once the buffer is fully drained.
        if state.records.is_empty() {
            return if state.stop_requested {
                DequeueOutcome::Stopped
            } else {
                debug_assert!(timed_out);
                DequeueOutcome::TimedOut
            };
        }

        let batch_size = max_batch_size.min(state.records.len());
        out.extend(state.records.drain(..batch_size));
        DequeueOutcome::Batch
    }

    /// Request shutdown and wake all waiters. Idempotent.
    pub fn stop(&self) {
        let mut state = self.state.lock();
        state.stop_requested = true;
        drop(state);
        self.data_available.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;
    use std::sync::Arc;
    use std::time::Instant;

    fn record(line: &str) -> LogRecord {
        LogRecord::new(LogLevel::Info, line)
    }

    fn lines(batch: &[LogRecord]) -> Vec<&str> {
        batch.iter().map(|r| r.line.as_str()).collect()
    }

    #[test]
    fn test_drop_oldest_eviction() {
        let queue = BoundedLogQueue::new(10);
        for i in 0..=10 {
            queue.enqueue(record(&format!("m{}", i)));
        }
        assert_eq!(queue.len(), 10);

        let mut batch = Vec::new();
        assert_eq!(
            queue.dequeue(&mut batch, 100, Duration::from_millis(10)),
            DequeueOutcome::Batch
        );
        let expected: Vec<String> = (1..=10).map(|i| format!("m{}", i)).collect();
        assert_eq!(lines(&batch), expected.iter().map(|s| s.as_str()).collect::<Vec<_>>());
    }

    #[test]
    fn test_enqueue_reports_eviction() {
        let queue = BoundedLogQueue::new(2);
        assert!(!queue.enqueue(record("a")));
        assert!(!queue.enqueue(record("b")));
        assert!(queue.enqueue(record("c")));
    }

    #[test]
    fn test_partial_batch_preserves_order() {
        let queue = BoundedLogQueue::new(10);
        for i in 0..5 {
            queue.enqueue(record(&format!("m{}", i)));
        }

        let mut batch = Vec::new();
        assert_eq!(
            queue.dequeue(&mut batch, 3, Duration::from_millis(10)),
            DequeueOutcome::Batch
        );
        assert_eq!(lines(&batch), vec!["m0", "m1", "m2"]);
        assert_eq!(queue.len(), 2);

        let mut rest = Vec::new();
        assert_eq!(
            queue.dequeue(&mut rest, 3, Duration::from_millis(10)),
            DequeueOutcome::Batch
        );
        assert_eq!(lines(&rest), vec!["m3", "m4"]);
    }

    #[test]
    fn test_dequeue_times_out_when_idle() {
        let queue = BoundedLogQueue::new(10);
        let mut batch = Vec::new();
        let start = Instant::now();
        let outcome = queue.dequeue(&mut batch, 10, Duration::from_millis(50));
        let elapsed = start.elapsed();

        assert_eq!(outcome, DequeueOutcome::TimedOut);
        assert!(batch.is_empty());
        assert!(elapsed >= Duration::from_millis(40));
        assert!(elapsed < Duration::from_secs(2), "dequeue blocked too long");
    }

    #[test]
    fn test_dequeue_after_stop_empty_returns_immediately() {
        let queue = BoundedLogQueue::new(10);
        queue.stop();

        let mut batch = Vec::new();
        let start = Instant::now();
        let outcome = queue.dequeue(&mut batch, 10, Duration::from_secs(10));
        assert_eq!(outcome, DequeueOutcome::Stopped);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_stop_drains_before_terminating() {
        let queue = BoundedLogQueue::new(10);
        queue.enqueue(record("m0"));
        queue.enqueue(record("m1"));
        queue.stop();

        let mut batch = Vec::new();
        assert_eq!(
            queue.dequeue(&mut batch, 10, Duration::from_millis(10)),
            DequeueOutcome::Batch
        );
        assert_eq!(lines(&batch), vec!["m0", "m1"]);

        let mut rest = Vec::new();
        assert_eq!(
            queue.dequeue(&mut rest, 10, Duration::from_millis(10)),
            DequeueOutcome::Stopped
        );
    }

    #[test]
    fn test_stop_is_idempotent() {
        let queue = BoundedLogQueue::new(4);
        queue.stop();
        queue.stop();
        queue.enqueue(record("late"));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_enqueue_after_stop_still_accepted() {
        let queue = BoundedLogQueue::new(4);
        queue.stop();
        queue.enqueue(record("late"));

        let mut batch = Vec::new();
        assert_eq!(
            queue.dequeue(&mut batch, 10, Duration::from_millis(10)),
            DequeueOutcome::Batch
        );
        assert_eq!(lines(&batch), vec!["late"]);
    }

    #[test]
    fn test_concurrent_enqueue_no_loss_no_duplication() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 100;

        let queue = Arc::new(BoundedLogQueue::new(THREADS * PER_THREAD));
        let mut handles = Vec::new();
        for t in 0..THREADS {
            let queue = Arc::clone(&queue);
            handles.push(std::thread::spawn(move || {
                for i in 0..PER_THREAD {
                    queue.enqueue(record(&format!("t{}-m{}", t, i)));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(queue.len(), THREADS * PER_THREAD);

        let mut all = Vec::new();
        while queue.dequeue(&mut all, 64, Duration::from_millis(1)) == DequeueOutcome::Batch {}
        assert_eq!(all.len(), THREADS * PER_THREAD);

        let mut seen: std::collections::HashSet<&str> =
            all.iter().map(|r| r.line.as_str()).collect();
        assert_eq!(seen.len(), THREADS * PER_THREAD, "duplicated records");
        for t in 0..THREADS {
            for i in 0..PER_THREAD {
                assert!(seen.remove(format!("t{}-m{}", t, i).as_str()));
            }
        }
    }

    #[test]
    fn test_per_producer_fifo_order() {
        let queue = Arc::new(BoundedLogQueue::new(1000));
        let producer = {
            let queue = Arc::clone(&queue);
            std::thread::spawn(move || {
                for i in 0..200 {
                    queue.enqueue(record(&format!("m{}", i)));
                }
            })
        };
        producer.join().unwrap();

        let mut all = Vec::new();
        while queue.dequeue(&mut all, 64, Duration::from_millis(1)) == DequeueOutcome::Batch {}
        let got: Vec<String> = all.iter().map(|r| r.line.clone()).collect();
        let expected: Vec<String> = (0..200).map(|i| format!("m{}", i)).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let queue = BoundedLogQueue::new(0);
        assert_eq!(queue.capacity(), 1);
        queue.enqueue(record("a"));
        queue.enqueue(record("b"));
        assert_eq!(queue.len(), 1);
    }
}
