//! Data models for the detection pipeline.
//!
//! This module contains data structures passed between the pipeline stages
//! and handed to the presentation layer.

mod sample;
mod tick_result;

pub use sample::{AnomalyRecord, Sample};
pub use tick_result::{AlertSeverity, TickResult};
