//! Contract definitions for the detection pipeline.
//!
//! Providers implement these traits to plug a value source or an
//! anomaly record sink into the orchestrator.

mod anomaly_sink;
mod stream_source;

pub use anomaly_sink::AnomalySink;
pub use stream_source::StreamSource;
