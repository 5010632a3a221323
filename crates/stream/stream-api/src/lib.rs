//! Stream Anomaly Detection API
//!
//! Configuration types for the streaming detector.

pub mod config;

pub use config::*;

// Re-export SPI types
pub use stream_spi::{AlertSeverity, AnomalyRecord, Result, Sample, StreamError, TickResult};
