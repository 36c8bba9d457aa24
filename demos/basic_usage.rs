//! Basic engine usage example
//!
//! Demonstrates console logging at different levels and runtime level changes.
//!
//! Run with: cargo run --example basic_usage

use batchlog::prelude::*;

fn main() -> Result<()> {
    println!("=== batchlog - Basic Usage Example ===\n");

    // Create an engine with the default console sink
    let engine = LoggerEngine::builder()
        .prefix("demo")
        .min_level(LogLevel::Trace)
        .build()?;

    // Log messages at different levels
    println!("1. Logging at different levels:");
    engine.trace("This is a trace message");
    engine.debug("This is a debug message");
    engine.info("This is an info message");
    engine.warning("This is a warning message");
    engine.error("This is an error message");
    engine.critical("This is a critical message");

    println!("\n2. Logging with different minimum levels:");

    // Change minimum level
    engine.set_min_level(LogLevel::Info);
    println!("   Minimum level set to INFO - trace and debug won't show:");
    engine.trace("Trace message (hidden)");
    engine.debug("Debug message (hidden)");
    engine.info("Info message (visible)");
    engine.warning("Warning message (visible)");

    // Drain everything before the process exits
    engine.shutdown()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
