//! Basic logger usage example
//!
//! Demonstrates structured logging to the console with a service identity,
//! call-site fields and the three output formats.
//!
//! Run with: cargo run --example basic_usage

use async_field_logger::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Async Field Logger - Basic Usage Example ===\n");

    // JSON to stdout, identity attached to every record
    let logger = Logger::new("orders-service")?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message", fields![]);
    logger.info("order placed", fields! { "order_id" => "42", "amount_cents" => 1999 });
    logger.error("payment declined", fields! { "order_id" => "42", "retry" => true });
    logger.fatal("This is a fatal message (the process keeps running)", fields![]);
    logger.flush()?;

    println!("\n2. Minimum level set to ERROR - debug and info won't show:");
    logger.set_min_level(LogLevel::Error);
    logger.debug("Debug message (hidden)", fields![]);
    logger.info("Info message (hidden)", fields![]);
    error!(logger, ["attempt" => 3], "Retry {} failed", 3);
    logger.shutdown(Duration::from_secs(1))?;

    println!("\n3. Logfmt and text output:");
    for format in [OutputFormat::Logfmt, OutputFormat::Text] {
        let logger = Logger::builder("orders-service")
            .base_field("region", "eu-west-1")
            .output_format(format)
            .build()?;
        info!(logger, ["order_id" => "42"], "order shipped as {}", format);
        logger.shutdown(Duration::from_secs(1))?;
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
