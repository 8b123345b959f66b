//! Integration tests for the runtime sampler public API.

use std::time::Duration;

use runtime_sampler::sampler::names::{
    GAUGE_NAMES, STAT_GOROUTINES_EXIST, STAT_MEMSTATS_NUM_GC, STAT_MEMSTATS_PAUSE_NS,
};
use runtime_sampler::sampler::FnSource;
use runtime_sampler::{
    AppConfig, ChannelSink, MemStats, MemorySink, ObservationKind, Sampler, SamplerConfig,
    record_pause,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn fast_config() -> SamplerConfig {
    SamplerConfig::new(Duration::from_millis(1))
}

fn gauge_value(sink: &MemorySink, name: &str) -> Option<f64> {
    sink.gauges()
        .into_iter()
        .rev()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v)
}

// =============================================================================
// Process source
// =============================================================================

#[tokio::test]
async fn test_process_source_reports_recorded_pauses() {
    // The only test in this binary that writes to the global pause log.
    let recorded = [
        Duration::from_micros(150),
        Duration::from_micros(40),
        Duration::from_millis(2),
    ];
    for pause in recorded {
        record_pause(pause);
    }

    let sink = MemorySink::new();
    let handle = Sampler::new(&fast_config(), sink.clone()).unwrap().start();
    handle.shutdown().await;

    let expected: Vec<f64> = recorded.iter().map(|d| d.as_nanos() as f64).collect();
    assert_eq!(sink.histograms(STAT_MEMSTATS_PAUSE_NS), expected);
    assert_eq!(gauge_value(&sink, STAT_MEMSTATS_NUM_GC), Some(3.0));
    assert!(gauge_value(&sink, STAT_GOROUTINES_EXIST).unwrap() >= 1.0);
}

#[tokio::test]
async fn test_every_tick_emits_all_gauges() {
    let sink = MemorySink::new();
    let handle = Sampler::new(&fast_config(), sink.clone()).unwrap().start();
    tokio::time::sleep(Duration::from_millis(10)).await;
    handle.shutdown().await;

    let gauges = sink.gauges();
    assert!(!gauges.is_empty());
    for (tick, chunk) in gauges.chunks(GAUGE_NAMES.len()).enumerate() {
        let names: Vec<&str> = chunk.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, GAUGE_NAMES, "tick {tick} emitted unexpected gauges");
    }
}

// =============================================================================
// Sinks
// =============================================================================

#[tokio::test]
async fn test_channel_sink_receives_first_tick() {
    let (sink, mut rx) = ChannelSink::channel(1024);
    let source = FnSource::new(
        |stats: &mut MemStats| {
            stats.num_gc = 2;
            stats.pause_ns[0] = 100;
            stats.pause_ns[1] = 200;
        },
        || 4,
    );

    let handle = Sampler::new(&fast_config(), sink)
        .unwrap()
        .with_source(source)
        .start();
    handle.stop();
    handle.shutdown().await;

    let mut received = Vec::new();
    while let Ok(observation) = rx.try_recv() {
        received.push(observation);
    }

    let gauges = received
        .iter()
        .filter(|o| o.kind == ObservationKind::Gauge)
        .count();
    let pauses: Vec<f64> = received
        .iter()
        .filter(|o| o.kind == ObservationKind::Histogram)
        .map(|o| o.value)
        .collect();
    assert_eq!(gauges, 14);
    assert_eq!(pauses, vec![100.0, 200.0]);
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn test_sampler_from_yaml_config() {
    let config = AppConfig::from_yaml("sampler:\n  interval: 1ms\n").unwrap();
    let sink = MemorySink::new();
    let handle = Sampler::new(&config.sampler, sink.clone()).unwrap().start();
    handle.shutdown().await;

    assert!(sink.len() >= 14);
}
