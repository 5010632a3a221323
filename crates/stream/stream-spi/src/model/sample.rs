//! Sample and anomaly record types.

use serde::{Deserialize, Serialize};

/// One observation of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Tick number, starting at 1.
    pub sequence: u64,
    pub value: f64,
}

impl Sample {
    pub fn new(sequence: u64, value: f64) -> Self {
        Self { sequence, value }
    }
}

/// A sample that was confirmed anomalous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub sequence: u64,
    pub value: f64,
}

impl AnomalyRecord {
    pub fn new(sequence: u64, value: f64) -> Self {
        Self { sequence, value }
    }
}

impl From<Sample> for AnomalyRecord {
    fn from(sample: Sample) -> Self {
        Self::new(sample.sequence, sample.value)
    }
}
