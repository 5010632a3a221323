//! Rolling z-score anomaly detector.

use serde::{Deserialize, Serialize};
use stream_api::{BaselinePolicy, StreamConfig};
use stream_spi::{Result, Sample, StreamError};

use crate::exclusion::ExclusionSet;

/// Fewest unexcluded samples needed to compute statistics.
pub const MIN_BASELINE: usize = 2;

/// Statistics behind a single classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    /// Number of samples in the baseline after filtering.
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divides by `count`).
    pub std_dev: f64,
    pub z_score: f64,
}

/// Rolling z-score detector.
///
/// Scores a value against the mean and population standard deviation of a
/// window, skipping samples whose value is in the exclusion set. When the
/// baseline has zero spread, a value equal to the mean scores `0.0` and any
/// other value scores an infinite z-score of matching sign.
///
/// @algorithm RollingZScore
/// @category StatisticalDetector
/// @complexity O(n) per classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingZScore {
    threshold: f64,
    baseline: BaselinePolicy,
}

impl RollingZScore {
    /// Create a detector with the given threshold.
    pub fn new(threshold: f64, baseline: BaselinePolicy) -> Result<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(StreamError::invalid(
                "threshold",
                "must be finite and positive",
            ));
        }
        Ok(Self {
            threshold,
            baseline,
        })
    }

    /// Create from configuration.
    pub fn from_config(config: &StreamConfig) -> Result<Self> {
        Self::new(config.threshold, config.baseline)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn baseline(&self) -> BaselinePolicy {
        self.baseline
    }

    /// Compute baseline statistics and the z-score of `value`.
    ///
    /// `window` is expected to end with the candidate sample. Returns `None`
    /// when fewer than [`MIN_BASELINE`] samples survive filtering.
    pub fn evaluate(
        &self,
        value: f64,
        window: &[Sample],
        excluded: &ExclusionSet,
    ) -> Option<WindowStats> {
        let window = match self.baseline {
            BaselinePolicy::IncludeCandidate => window,
            BaselinePolicy::ExcludeCandidate => match window.split_last() {
                Some((_, rest)) => rest,
                None => window,
            },
        };

        let values: Vec<f64> = window
            .iter()
            .map(|s| s.value)
            .filter(|v| !excluded.contains(*v))
            .collect();
        if values.len() < MIN_BASELINE {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std_dev = (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();

        Some(WindowStats {
            count: values.len(),
            mean,
            std_dev,
            z_score: z_score(value, mean, std_dev),
        })
    }

    /// Whether `value` lies more than `threshold` deviations from the baseline.
    pub fn classify(&self, value: f64, window: &[Sample], excluded: &ExclusionSet) -> bool {
        self.evaluate(value, window, excluded)
            .map_or(false, |stats| self.is_anomalous(&stats))
    }

    pub fn is_anomalous(&self, stats: &WindowStats) -> bool {
        stats.z_score.abs() > self.threshold
    }
}

impl Default for RollingZScore {
    fn default() -> Self {
        Self {
            threshold: 3.0,
            baseline: BaselinePolicy::IncludeCandidate,
        }
    }
}

fn z_score(value: f64, mean: f64, std_dev: f64) -> f64 {
    let deviation = value - mean;
    if std_dev == 0.0 {
        if deviation == 0.0 {
            0.0
        } else {
            f64::INFINITY.copysign(deviation)
        }
    } else {
        deviation / std_dev
    }
}
