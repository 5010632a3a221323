//! Stream detection configuration types.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stream_spi::{Result, StreamError};

// ============================================================================
// Baseline Policy
// ============================================================================

/// Which samples form the baseline a candidate is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselinePolicy {
    /// The candidate is part of its own mean and standard deviation.
    #[default]
    IncludeCandidate,
    /// The newest sample is dropped from the baseline before scoring.
    ExcludeCandidate,
}

// ============================================================================
// Source Configuration
// ============================================================================

/// Parameters of the synthetic seasonal source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Number of points sampled from one sine period (default: 5).
    pub pattern_points: usize,
    /// Standard deviation of the Gaussian noise (default: 0.1).
    pub noise_std: f64,
    /// Probability of injecting a spike (default: 0.05).
    pub spike_probability: f64,
    /// Mean spike magnitude (default: 9.0).
    pub spike_mean: f64,
    /// Spike magnitude standard deviation (default: 0.5).
    pub spike_std: f64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            pattern_points: 5,
            noise_std: 0.1,
            spike_probability: 0.05,
            spike_mean: 9.0,
            spike_std: 0.5,
        }
    }
}

impl SourceConfig {
    /// A source that never spikes.
    pub fn without_spikes() -> Self {
        Self {
            spike_probability: 0.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pattern_points < 2 {
            return Err(StreamError::invalid("pattern_points", "must be at least 2"));
        }
        check_std("noise_std", self.noise_std)?;
        check_std("spike_std", self.spike_std)?;
        if !(0.0..=1.0).contains(&self.spike_probability) {
            return Err(StreamError::invalid(
                "spike_probability",
                "must be in range [0, 1]",
            ));
        }
        if !self.spike_mean.is_finite() {
            return Err(StreamError::invalid("spike_mean", "must be finite"));
        }
        Ok(())
    }
}

fn check_std(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(StreamError::invalid(name, "must be finite and non-negative"));
    }
    Ok(())
}

// ============================================================================
// Stream Configuration
// ============================================================================

/// Stream detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Sliding window capacity (default: 20).
    pub window_size: usize,
    /// Z-score threshold for anomaly detection (default: 3.0).
    pub threshold: f64,
    /// Refresh cadence for callers that tick on a timer (default: 500 ms).
    pub tick_interval_ms: u64,
    /// Anomaly log location (default: `anomalies.csv`).
    pub log_path: PathBuf,
    /// Seed for the source; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub baseline: BaselinePolicy,
    pub source: SourceConfig,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            window_size: 20,
            threshold: 3.0,
            tick_interval_ms: 500,
            log_path: PathBuf::from("anomalies.csv"),
            seed: None,
            baseline: BaselinePolicy::default(),
            source: SourceConfig::default(),
        }
    }
}

impl StreamConfig {
    pub fn new(window_size: usize, threshold: f64) -> Self {
        Self {
            window_size,
            threshold,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    pub fn with_baseline(mut self, baseline: BaselinePolicy) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_tick_interval_ms(mut self, interval: u64) -> Self {
        self.tick_interval_ms = interval;
        self
    }

    pub fn with_source(mut self, source: SourceConfig) -> Self {
        self.source = source;
        self
    }

    /// Check every parameter, source included.
    pub fn validate(&self) -> Result<()> {
        if self.window_size < 2 {
            return Err(StreamError::invalid("window_size", "must be at least 2"));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(StreamError::invalid(
                "threshold",
                "must be finite and positive",
            ));
        }
        self.source.validate()
    }

    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| StreamError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
