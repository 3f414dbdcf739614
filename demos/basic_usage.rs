//! Basic logger usage example
//!
//! Demonstrates a small logger hierarchy with console output, processors and
//! the registry.
//!
//! Run with: cargo run --example basic_usage

use rust_log_dispatch::prelude::*;
use rust_log_dispatch::{info, warning};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Log Dispatch - Basic Usage Example ===\n");

    // Root logger writes everything from INFO up to the console
    let app = Logger::builder("app")
        .handler(ConsoleHandler::with_level(LogLevel::Info))
        .processor(ThreadProcessor::new())
        .build_shared();

    println!("1. Logging at different levels:");
    app.debug("This is a debug message (filtered)")?;
    app.info("This is an info message")?;
    app.notice("This is a notice message")?;
    app.warning("This is a warning message")?;
    app.error("This is an error message")?;
    app.critical("This is a critical message")?;

    println!("\n2. Child loggers forward to their parent:");
    let db = Logger::builder("app.db")
        .processor(TagProcessor::new(["database"]))
        .parent(&app)
        .build();
    let context = LogContext::new()
        .with_field("query_ms", 1250)
        .with_field("table", "orders");
    db.log_with_context(LogLevel::Warning, "Slow query", context)?;

    println!("\n3. A non-bubbling handler keeps records from lower handlers:");
    let audit = TestHandler::with_level(LogLevel::Notice, false);
    let http = Logger::builder("app.http")
        .handler(NullHandler::new(LogLevel::Debug))
        .handler(audit.clone())
        .processor(UidProcessor::new())
        .parent(&app)
        .build();
    info!(http, "GET /orders took {}ms", 12)?;
    warning!(http, "Rate limit at {}%", 90)?;
    println!(
        "   audit handler captured {} record(s), parent still printed both",
        audit.len()
    );

    println!("\n4. JSON output with a fixed clock:");
    let json = Logger::builder("app.json")
        .handler(ConsoleHandler::new().with_output_format(OutputFormat::Json))
        .clock(ClockConfig::new().with_timezone(TimeZoneSetting::Utc))
        .build();
    json.notice("Structured line")?;

    println!("\n5. Looking loggers up by name:");
    let registry = Registry::global();
    registry.add_logger(Arc::clone(&app), None, false)?;
    registry.get_instance("app")?.info("Fetched from the registry")?;

    app.flush()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
