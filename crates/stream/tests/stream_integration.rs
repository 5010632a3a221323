//! Integration tests for the stream crate

use stream::{
    AnomalyRecord, AnomalySink, BaselinePolicy, ExclusionSet, MemorySink, RollingZScore,
    Sample, SeasonalSource, SourceConfig, StreamConfig, StreamMonitor, StreamSource,
    WindowBuffer,
};

fn flat_window_with(candidate: f64) -> Vec<Sample> {
    let mut window: Vec<Sample> = (1..=19).map(|i| Sample::new(i, 1.0)).collect();
    window.push(Sample::new(20, candidate));
    window
}

#[test]
fn test_flat_window_spike_both_policies() {
    let window = flat_window_with(50.0);
    let excluded = ExclusionSet::new();

    let inclusive = RollingZScore::new(3.0, BaselinePolicy::IncludeCandidate).unwrap();
    let exclusive = RollingZScore::new(3.0, BaselinePolicy::ExcludeCandidate).unwrap();

    assert!(inclusive.classify(50.0, &window, &excluded));
    assert!(exclusive.classify(50.0, &window, &excluded));
}

#[test]
fn test_window_buffer_feeds_detector() {
    let mut window = WindowBuffer::new(20);
    let detector = RollingZScore::default();
    let excluded = ExclusionSet::new();

    for i in 1..=19 {
        window.push(Sample::new(i, [0.0, 0.1, -0.1][i as usize % 3]));
    }
    window.push(Sample::new(20, 0.05));
    assert!(!detector.classify(0.05, &window.snapshot(), &excluded));

    window.push(Sample::new(21, -9.0));
    assert_eq!(window.len(), 20);
    assert!(detector.classify(-9.0, &window.snapshot(), &excluded));
}

#[test]
fn test_boxed_source_and_sink() {
    let source: Box<dyn StreamSource> =
        Box::new(SeasonalSource::seeded(&SourceConfig::default(), 8).unwrap());
    let sink: Box<dyn AnomalySink> = Box::new(MemorySink::new());

    let mut monitor = StreamMonitor::new(StreamConfig::default(), source, sink).unwrap();
    let results = monitor.run(100).unwrap();
    assert_eq!(results.len(), 100);
    assert_eq!(monitor.history().len(), 100);
}

#[test]
fn test_anomalies_match_results() {
    let config = StreamConfig::default();
    let source = SeasonalSource::seeded(&config.source, 31).unwrap();
    let mut monitor = StreamMonitor::new(config, source, MemorySink::new()).unwrap();

    let results = monitor.run(1_000).unwrap();
    let flagged: Vec<AnomalyRecord> = results
        .iter()
        .filter(|r| r.is_anomaly)
        .map(|r| AnomalyRecord::new(r.sequence, r.value))
        .collect();

    assert_eq!(monitor.anomalies(), flagged.as_slice());
    assert_eq!(monitor.sink().records(), flagged.as_slice());
    for result in &results {
        assert_eq!(result.is_anomaly, !result.alert_message.is_empty());
        assert_eq!(result.is_anomaly, result.severity.is_some());
    }
}

#[test]
fn test_custom_window_size() {
    let config = StreamConfig::new(50, 3.0);
    let source = SeasonalSource::seeded(&SourceConfig::without_spikes(), 4).unwrap();
    let mut monitor = StreamMonitor::new(config, source, MemorySink::new()).unwrap();
    monitor.run(120).unwrap();
    assert_eq!(monitor.window().len(), 50);
    assert_eq!(monitor.window().capacity(), 50);
}
