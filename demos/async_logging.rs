//! Async logging example
//!
//! Demonstrates the background delivery pipeline under multi-threaded load.
//!
//! Run with: cargo run --example async_logging

use batchlog::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== batchlog - Async Logging Example ===\n");

    // Bounded queue: under overload the oldest records are dropped so
    // producers never block.
    let engine = Arc::new(
        LoggerEngine::builder()
            .sink_selection(SinkSelection::ConsoleAndFile)
            .file("async_demo.log", 0, 0)
            .queue_capacity(1000)
            .build()?,
    );

    println!("1. High-throughput async logging:");

    // Log many messages quickly; each call only enqueues
    for i in 0..100 {
        engine.info(format!("Message #{}", i));
    }

    println!("   Logged 100 messages asynchronously");

    // Multi-threaded logging
    println!("\n2. Multi-threaded logging:");

    let mut handles = vec![];
    for thread_id in 0..5 {
        let engine = Arc::clone(&engine);
        let handle = thread::spawn(move || {
            for i in 0..20 {
                engine.info(format!("Thread {} - Message {}", thread_id, i));
                thread::sleep(Duration::from_millis(10));
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    println!("   5 threads logged 20 messages each");

    engine.shutdown()?;

    let metrics = engine.metrics();
    println!("\n3. Delivery metrics:");
    println!("   Enqueued:   {}", metrics.enqueued_count());
    println!("   Dispatched: {}", metrics.dispatched_count());
    println!("   Evicted:    {}", metrics.evicted_count());

    println!("\n=== Example completed successfully! ===");
    println!("Check 'async_demo.log' for file output");

    Ok(())
}
