//! Basic example: run a seeded stream and print what was flagged
//!
//! Run with: cargo run --example basic -p stream

use stream::{CsvAnomalyLog, DefaultMonitor, StreamConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== rustful-stream Basic Example ===\n");

    let log_path = std::env::temp_dir().join("rustful-stream-basic.csv");
    let config = StreamConfig::default()
        .with_seed(2024)
        .with_log_path(&log_path);
    let mut monitor = DefaultMonitor::from_config(config)?;

    for result in monitor.run(300)? {
        if result.is_anomaly {
            println!(
                "{}  value={:.4}  z={:.2}",
                result.alert_message,
                result.value,
                result.score.unwrap_or_default()
            );
        }
    }

    let logged = CsvAnomalyLog::read_records(&log_path)?;
    println!("\nTicks: {}", monitor.sequence());
    println!("Anomalies: {} (logged to {:?})", logged.len(), log_path);
    if let Some(view) = monitor.viewport() {
        println!("Viewport: x={:?} y=({:.2}, {:.2})", view.x_range, view.y_range.0, view.y_range.1);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
