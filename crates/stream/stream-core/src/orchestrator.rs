//! Per-tick orchestration of the detection pipeline.

use stream_api::StreamConfig;
use stream_spi::{AnomalyRecord, AnomalySink, Result, Sample, StreamSource, TickResult};

use crate::detector::RollingZScore;
use crate::exclusion::ExclusionSet;
use crate::log::CsvAnomalyLog;
use crate::source::SeasonalSource;
use crate::view::Viewport;
use crate::window::WindowBuffer;

/// Monitor over the seasonal source writing to the CSV log.
pub type DefaultMonitor = StreamMonitor<SeasonalSource, CsvAnomalyLog>;

/// Single-stream detector owning all per-stream state.
///
/// Each [`tick`](Self::tick) draws one value, slides it into the window,
/// scores it against the window minus previously flagged values and records
/// it if anomalous. The candidate is already in the window when scored.
#[derive(Debug)]
pub struct StreamMonitor<S, K> {
    config: StreamConfig,
    source: S,
    sink: K,
    detector: RollingZScore,
    window: WindowBuffer,
    excluded: ExclusionSet,
    history: Vec<Sample>,
    anomalies: Vec<AnomalyRecord>,
    sequence: u64,
}

impl<S: StreamSource, K: AnomalySink> StreamMonitor<S, K> {
    /// Validate the configuration and reset the sink so the session starts clean.
    pub fn new(config: StreamConfig, source: S, mut sink: K) -> Result<Self> {
        config.validate()?;
        let detector = RollingZScore::from_config(&config)?;
        sink.reset()?;

        Ok(Self {
            window: WindowBuffer::new(config.window_size),
            config,
            source,
            sink,
            detector,
            excluded: ExclusionSet::new(),
            history: Vec::new(),
            anomalies: Vec::new(),
            sequence: 0,
        })
    }

    /// Advance the stream by one sample and classify it.
    ///
    /// A sink failure is returned after the in-memory state has been updated.
    pub fn tick(&mut self) -> Result<TickResult> {
        let value = self.source.next_value();
        self.sequence += 1;
        let sample = Sample::new(self.sequence, value);

        self.history.push(sample);
        self.window.push(sample);

        let snapshot = self.window.snapshot();
        let stats = self.detector.evaluate(value, &snapshot, &self.excluded);

        match stats {
            Some(stats) if self.detector.is_anomalous(&stats) => {
                let record = AnomalyRecord::from(sample);
                self.anomalies.push(record);
                self.excluded.insert(value);
                tracing::warn!(
                    sequence = sample.sequence,
                    value,
                    z_score = stats.z_score,
                    "anomaly detected"
                );
                self.sink.append(&record)?;
                Ok(TickResult::anomaly(sample.sequence, value, stats.z_score))
            }
            _ => {
                tracing::debug!(
                    sequence = sample.sequence,
                    value,
                    z_score = ?stats.map(|s| s.z_score),
                    "tick"
                );
                Ok(TickResult::normal(
                    sample.sequence,
                    value,
                    stats.map(|s| s.z_score),
                ))
            }
        }
    }

    /// Run `ticks` ticks, stopping at the first error.
    pub fn run(&mut self, ticks: usize) -> Result<Vec<TickResult>> {
        (0..ticks).map(|_| self.tick()).collect()
    }

    /// Every sample generated so far, oldest first.
    pub fn history(&self) -> &[Sample] {
        &self.history
    }

    /// Confirmed anomalies in detection order.
    pub fn anomalies(&self) -> &[AnomalyRecord] {
        &self.anomalies
    }

    pub fn window(&self) -> &WindowBuffer {
        &self.window
    }

    pub fn excluded(&self) -> &ExclusionSet {
        &self.excluded
    }

    /// Sequence number of the latest sample, `0` before the first tick.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn detector(&self) -> &RollingZScore {
        &self.detector
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Chart axis ranges for the history so far.
    pub fn viewport(&self) -> Option<Viewport> {
        Viewport::from_history(&self.history)
    }

    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }
}

impl DefaultMonitor {
    /// Build a monitor from configuration alone: seeded source when a seed
    /// is set, CSV log at `log_path`.
    pub fn from_config(config: StreamConfig) -> Result<Self> {
        let source = match config.seed {
            Some(seed) => SeasonalSource::seeded(&config.source, seed)?,
            None => SeasonalSource::from_entropy(&config.source)?,
        };
        let sink = CsvAnomalyLog::new(config.log_path.clone());
        Self::new(config, source, sink)
    }
}
