//! Stream Anomaly Detection Service Provider Interface
//!
//! Defines the contracts, data model and error type shared by the
//! streaming detector crates.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{AnomalySink, StreamSource};
pub use error::{Result, StreamError};
pub use model::{AlertSeverity, AnomalyRecord, Sample, TickResult};
