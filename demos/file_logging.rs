//! File logging example
//!
//! Demonstrates file output with size-based rotation and runtime sink
//! selection changes.
//!
//! Run with: cargo run --example file_logging

use batchlog::prelude::*;

fn main() -> Result<()> {
    println!("=== batchlog - File Logging Example ===\n");

    // Rotate when the file reaches 4 KiB, keeping up to 3 rotated files
    let engine = LoggerEngine::builder()
        .prefix("file-demo")
        .sink_selection(SinkSelection::File)
        .file("file_demo.log", 4096, 3)
        .build()?;

    println!("1. Writing enough messages to trigger rotation:");
    for i in 0..200 {
        engine.info(format!("A reasonably sized log message number {}", i));
    }
    println!("   Wrote 200 messages to 'file_demo.log'");

    println!("\n2. Switching the sink selection at runtime:");
    engine.set_sink_selection(SinkSelection::ConsoleAndFile);
    engine.warning("This message goes to both console and file");

    println!("\n3. Re-targeting the file sink:");
    engine.setup_file("file_demo_other.log", 0, 0)?;
    engine.info("This message lands in the new file");

    engine.shutdown()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'file_demo.log', its rotated siblings, and 'file_demo_other.log'");

    Ok(())
}
