//! Basic logger usage example
//!
//! Demonstrates the traditional layout on the console with the payload
//! shapes the logger accepts.
//!
//! Run with: cargo run --example basic_usage

use rust_tagged_logger::prelude::*;
use std::io;

fn main() -> Result<()> {
    println!("=== Rust Tagged Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .time_format("%H:%M:%S%.3f")
        .process_id(true)
        .appender(ConsoleAppender::with_colors(true))
        .build()?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");

    println!("\n2. Payload shapes:");
    logger.info(vec!["first line", "second line"]);
    logger.info(vec![("job", FieldValue::from(42)), ("queue", "builds".into())]);
    logger.info(Payload::debug(&Some((1, "two"))));

    let err = io::Error::new(io::ErrorKind::NotFound, "config.yml missing");
    logger.error(Payload::from_error(&err));
    logger.error(
        ErrorPayload::new("TimeoutError", "deadline exceeded")
            .with_backtrace(["worker.rs:10", "main.rs:3"]),
    );

    println!("\n3. Raising the minimum level:");
    let mut logger = logger;
    logger.set_min_level(LogLevel::Warn);
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
