//! Per-tick result types.

use serde::{Deserialize, Serialize};

/// Alert severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl AlertSeverity {
    /// Scores beyond this magnitude are critical.
    pub const CRITICAL_SCORE: f64 = 5.0;

    /// Grade an anomaly by its z-score.
    pub fn from_score(score: f64) -> Self {
        if score.abs() > Self::CRITICAL_SCORE {
            AlertSeverity::Critical
        } else {
            AlertSeverity::Warning
        }
    }
}

/// Outcome of a single tick, consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickResult {
    pub sequence: u64,
    pub value: f64,
    pub is_anomaly: bool,
    /// Empty unless `is_anomaly` is set.
    pub alert_message: String,
    /// Z-score of the value, `None` when the window was too small.
    pub score: Option<f64>,
    pub severity: Option<AlertSeverity>,
}

impl TickResult {
    /// Result for a sample that was not flagged.
    pub fn normal(sequence: u64, value: f64, score: Option<f64>) -> Self {
        Self {
            sequence,
            value,
            is_anomaly: false,
            alert_message: String::new(),
            score,
            severity: None,
        }
    }

    /// Result for a confirmed anomaly.
    pub fn anomaly(sequence: u64, value: f64, score: f64) -> Self {
        Self {
            sequence,
            value,
            is_anomaly: true,
            alert_message: format!("Anomaly detected at time step {}!", sequence),
            score: Some(score),
            severity: Some(AlertSeverity::from_score(score)),
        }
    }
}
