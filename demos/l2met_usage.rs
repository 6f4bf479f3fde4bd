//! l2met logging example
//!
//! Demonstrates key=value output with per-call tags. The process name is
//! read from `APP_PROCESS_NAME` when set.
//!
//! Run with: APP_PROCESS_NAME=hub.1 cargo run --example l2met_usage

use rust_tagged_logger::prelude::*;
use rust_tagged_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Tagged Logger - l2met Example ===\n");

    let mut builder = Logger::builder()
        .layout(Layout::L2met)
        .thread_id(true)
        .process_id(true)
        .appender(ConsoleAppender::new());
    if let Ok(name) = std::env::var("APP_PROCESS_NAME") {
        builder = builder.process_name(name);
    }
    let logger = builder.build()?;

    logger.info("worker started");
    logger.info_with_tags(
        "job finished",
        Tags::new().with("job_id", 9001).with("duration", 1.25),
    );

    // Values containing whitespace are quoted
    logger.warn_with_tags("slow query", Tags::new().with("sql", "SELECT * FROM jobs"));

    // Tags override built-in keys
    logger.error_with_tags("boom", Tags::new().with("level", "critical"));

    info!(logger, { "repo" => "octo/cat", "attempt" => 2 }, "sync {}", "complete");
    warn!(logger, "queue depth {}", 17);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
