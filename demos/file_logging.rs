//! File logging example
//!
//! Demonstrates building a logger from a JSON configuration and writing to
//! both the console and a log file.
//!
//! Run with: cargo run --example file_logging

use rust_tagged_logger::prelude::*;

const CONFIG: &str = r#"{
    "log_level": "info",
    "logger": {
        "format_type": "l2met",
        "thread_id": true,
        "process_id": true
    }
}"#;

fn main() -> Result<()> {
    println!("=== Rust Tagged Logger - File Logging Example ===\n");

    let config = LoggerConfig::from_json(CONFIG)?;
    let mut logger = Logger::from_config(&config, Some("worker.1".to_string()))?;

    logger.add_appender(Box::new(ConsoleAppender::new()));
    logger.add_appender(Box::new(FileAppender::new("application.log")?));

    println!("1. Logging to both console and file:");
    logger.info("Application started");
    logger.debug("Loading configuration... (filtered)");
    logger.info_with_tags("Configuration loaded", Tags::new().with("source", "inline"));

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.info_with_tags("Processing item", Tags::new().with("item", i).with("of", 5));
        if i == 3 {
            logger.warn_with_tags("Item took longer than expected", Tags::new().with("item", i));
        }
    }

    logger.info("All operations completed");
    logger.flush()?;

    let metrics = logger.metrics();
    println!(
        "\nlogged={} filtered={} dropped={}",
        metrics.total_logged(),
        metrics.filtered_count(),
        metrics.dropped_count()
    );

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the full log output");

    Ok(())
}
