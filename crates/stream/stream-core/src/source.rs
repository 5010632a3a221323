//! Synthetic seasonal stream source.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use stream_api::SourceConfig;
use stream_spi::{Result, StreamError, StreamSource};

/// Noisy sine-pattern generator with occasional large spikes.
///
/// Each value is one of `pattern_points` samples of a full sine period plus
/// Gaussian noise. With probability `spike_probability` a spike of
/// `Normal(spike_mean, spike_std)` magnitude is added or subtracted with
/// equal odds.
#[derive(Debug, Clone)]
pub struct SeasonalSource<R: Rng = StdRng> {
    pattern: Vec<f64>,
    noise: Normal<f64>,
    spike: Normal<f64>,
    spike_probability: f64,
    rng: R,
}

impl<R: Rng> SeasonalSource<R> {
    /// Create a source drawing from the given random generator.
    pub fn new(config: &SourceConfig, rng: R) -> Result<Self> {
        config.validate()?;

        let noise = Normal::new(0.0, config.noise_std)
            .map_err(|e| StreamError::invalid("noise_std", e.to_string()))?;
        let spike = Normal::new(config.spike_mean, config.spike_std)
            .map_err(|e| StreamError::invalid("spike_std", e.to_string()))?;

        Ok(Self {
            pattern: seasonal_pattern(config.pattern_points),
            noise,
            spike,
            spike_probability: config.spike_probability,
            rng,
        })
    }

    /// The base values a sample is drawn from.
    pub fn pattern(&self) -> &[f64] {
        &self.pattern
    }
}

impl SeasonalSource<StdRng> {
    /// Reproducible source: the same seed yields the same stream.
    pub fn seeded(config: &SourceConfig, seed: u64) -> Result<Self> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Source seeded from OS entropy.
    pub fn from_entropy(config: &SourceConfig) -> Result<Self> {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> StreamSource for SeasonalSource<R> {
    fn next_value(&mut self) -> f64 {
        let base = self.pattern[self.rng.gen_range(0..self.pattern.len())];
        let mut value = base + self.noise.sample(&mut self.rng);

        if self.rng.gen::<f64>() < self.spike_probability {
            let magnitude = self.spike.sample(&mut self.rng);
            if self.rng.gen::<f64>() > 0.5 {
                value += magnitude;
            } else {
                value -= magnitude;
            }
        }
        value
    }
}

impl<R: Rng> Iterator for SeasonalSource<R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_value())
    }
}

/// `sin` at `points` evenly spaced angles over `[0, 2π]`, both ends included.
fn seasonal_pattern(points: usize) -> Vec<f64> {
    let step = TAU / (points - 1) as f64;
    (0..points).map(|i| (i as f64 * step).sin()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_is_one_sine_period() {
        let pattern = seasonal_pattern(5);
        let expected = [0.0, 1.0, 0.0, -1.0, 0.0];
        assert_eq!(pattern.len(), 5);
        for (got, want) in pattern.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12, "{} vs {}", got, want);
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let config = SourceConfig::default();
        let a: Vec<f64> = SeasonalSource::seeded(&config, 42).unwrap().take(200).collect();
        let b: Vec<f64> = SeasonalSource::seeded(&config, 42).unwrap().take(200).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let config = SourceConfig::default();
        let a: Vec<f64> = SeasonalSource::seeded(&config, 1).unwrap().take(50).collect();
        let b: Vec<f64> = SeasonalSource::seeded(&config, 2).unwrap().take(50).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_values_stay_near_pattern_without_spikes() {
        let mut source = SeasonalSource::seeded(&SourceConfig::without_spikes(), 7).unwrap();
        for _ in 0..2_000 {
            let value = source.next_value();
            assert!(value.is_finite());
            // |sin| <= 1 plus a very generous noise allowance
            assert!(value.abs() < 2.0, "unexpected value {}", value);
        }
    }

    #[test]
    fn test_spikes_are_large() {
        let config = SourceConfig {
            spike_probability: 1.0,
            ..SourceConfig::default()
        };
        let mut source = SeasonalSource::seeded(&config, 3).unwrap();
        let mut up = 0;
        let mut down = 0;
        for _ in 0..500 {
            let value = source.next_value();
            assert!(value.abs() > 4.0, "spike too small: {}", value);
            if value > 0.0 {
                up += 1;
            } else {
                down += 1;
            }
        }
        assert!(up > 100 && down > 100, "up={} down={}", up, down);
    }

    #[test]
    fn test_spike_rate_roughly_five_percent() {
        let mut source = SeasonalSource::seeded(&SourceConfig::default(), 99).unwrap();
        let n = 20_000;
        let spikes = (0..n).filter(|_| source.next_value().abs() > 4.0).count();
        let rate = spikes as f64 / n as f64;
        assert!((0.03..0.07).contains(&rate), "spike rate {}", rate);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SourceConfig {
            noise_std: f64::NAN,
            ..SourceConfig::default()
        };
        assert!(SeasonalSource::seeded(&config, 0).is_err());
    }

    #[test]
    fn test_zero_noise_hits_pattern_exactly() {
        let config = SourceConfig {
            noise_std: 0.0,
            spike_probability: 0.0,
            ..SourceConfig::default()
        };
        let mut source = SeasonalSource::seeded(&config, 5).unwrap();
        let pattern = source.pattern().to_vec();
        for _ in 0..100 {
            let value = source.next_value();
            assert!(pattern.contains(&value));
        }
    }
}
