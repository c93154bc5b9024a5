// Vicinity - Pipeline Tests
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! End-to-end tests for the analysis pipeline.
//!
//! These tests verify:
//! - Range filtering at the admissible band boundaries
//! - Smoothing stability and causality
//! - Distance model monotonicity
//! - Classification boundaries
//! - Determinism across repeated runs

use vicinity::{
    AnalysisConfig, AnalysisPipeline, Calibration, ProximityZone, RawRecord, SignalStrength,
    HIDDEN_NAME, UNKNOWN_NAME,
};

fn record_at(secs: u32, device: &str, rssi: &str) -> RawRecord {
    RawRecord::new(
        &format!("2025-03-01T10:{:02}:{:02}Z", secs / 60, secs % 60),
        device,
        rssi,
    )
}

// ===========================================================================
// Range filter
// ===========================================================================

#[test]
fn test_band_boundaries_are_inclusive() {
    let pipeline = AnalysisPipeline::with_defaults();

    let report = pipeline.run(&[record_at(0, "a", "-95"), record_at(1, "a", "-20")]);
    assert_eq!(report.summaries[0].packet_count, 2);
    assert_eq!(report.clean_stats.out_of_range, 0);

    let report = pipeline.run(&[record_at(0, "a", "-95.5"), record_at(1, "a", "-19.5")]);
    assert!(report.is_empty());
    assert_eq!(report.clean_stats.out_of_range, 2);
}

// ===========================================================================
// Smoothing
// ===========================================================================

#[test]
fn test_constant_rssi_is_smoothed_to_itself() {
    // Regardless of window width, a constant series stays constant.
    for window_ms in [1_000, 10_000, 120_000] {
        let config = AnalysisConfig {
            smoothing_window_ms: window_ms,
            ..Default::default()
        };
        let pipeline = AnalysisPipeline::new(config, Calibration::default());

        let records: Vec<_> = (0..30).map(|i| record_at(i, "a", "-64")).collect();
        let (report, timeline) = pipeline.run_detailed(&records);

        assert!(timeline.iter().all(|o| o.rssi_smoothed == -64.0));
        assert_eq!(report.summaries[0].rssi_avg_dbm, -64.0);
    }
}

#[test]
fn test_smoothing_is_causal() {
    // Appending future observations must not change earlier smoothed values.
    let pipeline = AnalysisPipeline::with_defaults();

    let base: Vec<_> = (0..10).map(|i| record_at(i, "a", "-60")).collect();
    let mut extended = base.clone();
    extended.push(record_at(10, "a", "-25"));
    extended.push(record_at(11, "a", "-25"));

    let (_, short_timeline) = pipeline.run_detailed(&base);
    let (_, long_timeline) = pipeline.run_detailed(&extended);

    for (a, b) in short_timeline.iter().zip(long_timeline.iter()) {
        assert_eq!(a.rssi_smoothed, b.rssi_smoothed);
        assert_eq!(a.distance_m, b.distance_m);
    }
}

// ===========================================================================
// Distance model
// ===========================================================================

#[test]
fn test_distance_decreases_as_signal_strengthens() {
    let pipeline = AnalysisPipeline::with_defaults();

    let mut previous = f64::INFINITY;
    for rssi in ["-90", "-80", "-70", "-60", "-50", "-40", "-30"] {
        let report = pipeline.run(&[record_at(0, "a", rssi)]);
        let distance = report.summaries[0].distance_avg_m;
        assert!(distance < previous, "{} should be closer than {}", rssi, previous);
        previous = distance;
    }
}

#[test]
fn test_corrupt_calibration_falls_back_to_defaults() {
    use std::io::Write;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{{ not json").unwrap();
    file.flush().unwrap();

    let calibration = Calibration::load_or_default(file.path());
    assert_eq!(calibration, Calibration::default());
}

// ===========================================================================
// Classification
// ===========================================================================

#[test]
fn test_classification_boundaries() {
    // Mean distance exactly 2.00 m is Close (the < 2 test excludes the
    // boundary); exactly 5.00 m is Medium.
    assert_eq!(ProximityZone::from_mean_distance(2.0), ProximityZone::Close);
    assert_eq!(ProximityZone::from_mean_distance(5.0), ProximityZone::Medium);

    // Calibration chosen so -55 dBm maps to exactly 2 m: P0 - 10*n*log10(2).
    let calibration = Calibration::new(-55.0 + 10.0 * 3.0 * 2f64.log10(), 3.0);
    let pipeline = AnalysisPipeline::new(AnalysisConfig::default(), calibration);
    let report = pipeline.run(&[record_at(0, "a", "-55")]);

    assert_eq!(report.summaries[0].distance_avg_m, 2.0);
    assert_eq!(report.summaries[0].proximity, ProximityZone::Close);
}

#[test]
fn test_reference_scenario_two_packets() {
    let pipeline = AnalysisPipeline::with_defaults();
    let records = vec![
        record_at(0, "AA:BB:CC:DD:EE:FF", "-55"),
        record_at(1, "AA:BB:CC:DD:EE:FF", "-55"),
    ];

    let (report, timeline) = pipeline.run_detailed(&records);

    assert!(timeline.iter().all(|o| o.distance_m == 1.0));
    let s = &report.summaries[0];
    assert_eq!(s.distance_avg_m, 1.0);
    assert_eq!(s.proximity, ProximityZone::VeryClose);
    assert_eq!(s.signal, SignalStrength::Medium);
}

// ===========================================================================
// Determinism and terminal states
// ===========================================================================

#[test]
fn test_round_trip_determinism() {
    let pipeline = AnalysisPipeline::with_defaults();
    let records: Vec<_> = (0..50)
        .flat_map(|i| {
            vec![
                record_at(i, "a", &format!("-{}", 50 + (i % 13))),
                record_at(i, "b", &format!("-{}", 70 + (i % 7))),
            ]
        })
        .collect();

    let first = pipeline.run(&records);
    let second = pipeline.run(&records);

    assert_eq!(first.summaries, second.summaries);
    assert_eq!(first.series, second.series);
    assert_eq!(first.distance_stats, second.distance_stats);
}

#[test]
fn test_empty_input_yields_empty_report() {
    let pipeline = AnalysisPipeline::with_defaults();
    let report = pipeline.run(&[]);

    assert!(report.is_empty());
    assert!(report.series.is_empty());
    assert_eq!(report.clean_stats.retained, 0);
}

#[test]
fn test_mixed_quality_batch() {
    let pipeline = AnalysisPipeline::with_defaults();
    let records = vec![
        record_at(0, "a", "-60"),
        record_at(1, "a", "strong"),           // unparseable RSSI
        record_at(2, "a", "-10"),              // out of band
        RawRecord::new("bad", "a", "-60"),     // unparseable timestamp
        record_at(3, "a", "-62"),
    ];

    let report = pipeline.run(&records);
    assert_eq!(report.summaries[0].packet_count, 2);
    assert_eq!(report.clean_stats.dropped(), 3);
}

#[test]
fn test_sentinel_names_survive_to_summaries() {
    let pipeline = AnalysisPipeline::with_defaults();
    let records = vec![
        record_at(0, "unnamed", "-60"),
        record_at(0, "hidden", "-60").with_display_name(""),
    ];

    let report = pipeline.run(&records);
    let names: Vec<_> = report
        .summaries
        .iter()
        .map(|s| (s.device_id.as_str(), s.display_name.as_str()))
        .collect();

    assert!(names.contains(&("unnamed", UNKNOWN_NAME)));
    assert!(names.contains(&("hidden", HIDDEN_NAME)));
}
