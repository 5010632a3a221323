//! # stream
//!
//! Real-time anomaly detection over a synthetic seasonal stream.
//!
//! This facade provides a single entry point to the detection pipeline:
//! - `StreamSource` / `AnomalySink` contracts and the data model from SPI
//! - Configuration types from API
//! - Source, window, detector, log and `StreamMonitor` from Core

// Re-export everything from SPI
pub use stream_spi::*;

// Re-export everything from API
pub use stream_api::*;

// Re-export everything from Core
pub use stream_core::*;
