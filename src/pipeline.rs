// Vicinity - RSSI proximity analysis
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! AnalysisPipeline - orchestration of the signal-to-distance stages.
//!
//! Wires the cleaner, smoother, distance model, and aggregator into one
//! batch pass: validate, smooth per device, estimate distances, summarize.
//! The pipeline is synchronous and deterministic; running it twice over the
//! same input and calibration produces identical reports.

use crate::calibration::Calibration;
use crate::cleaner::{self, CleanStats};
use crate::config::AnalysisConfig;
use crate::distance::DistanceModel;
use crate::observation::{DistanceObservation, RawRecord};
use crate::smoother;
use crate::summary::{self, BinPoint, DeviceDistanceStats, DeviceSummary};

/// Complete output of one pipeline run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Per-device summary rows, sorted ascending by mean distance.
    pub summaries: Vec<DeviceSummary>,
    /// Per-device per-time-bin mean-distance series.
    pub series: Vec<BinPoint>,
    /// Per-device distance variability across bins.
    pub distance_stats: Vec<DeviceDistanceStats>,
    /// Validation drop diagnostics.
    pub clean_stats: CleanStats,
    /// The calibration the distances were computed with.
    pub calibration: Calibration,
}

impl AnalysisReport {
    /// True when cleaning left nothing to analyze. A valid terminal state,
    /// not an error.
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

/// The batch analysis pipeline.
///
/// Configuration and calibration are fixed at construction and never
/// mutated afterwards.
pub struct AnalysisPipeline {
    config: AnalysisConfig,
    model: DistanceModel,
}

impl AnalysisPipeline {
    /// Create a pipeline with explicit configuration and calibration.
    pub fn new(config: AnalysisConfig, calibration: Calibration) -> Self {
        Self {
            config,
            model: DistanceModel::new(calibration),
        }
    }

    /// Create a pipeline with default configuration and calibration.
    pub fn with_defaults() -> Self {
        Self::new(AnalysisConfig::default(), Calibration::default())
    }

    /// Run the full pipeline over a batch of raw records.
    pub fn run(&self, records: &[RawRecord]) -> AnalysisReport {
        self.run_detailed(records).0
    }

    /// Run the pipeline and also return the distance-augmented observation
    /// stream, for consumers that need the full timeline rather than the
    /// aggregates.
    pub fn run_detailed(&self, records: &[RawRecord]) -> (AnalysisReport, Vec<DistanceObservation>) {
        let (observations, clean_stats) = cleaner::clean(records, &self.config);
        log::info!(
            "analyzing {} observations ({} dropped)",
            clean_stats.retained,
            clean_stats.dropped()
        );

        let smoothed = smoother::smooth(observations, &self.config);
        let estimated: Vec<DistanceObservation> = smoothed
            .into_iter()
            .map(|s| self.model.estimate(s))
            .collect();

        let report = AnalysisReport {
            summaries: summary::summarize_devices(&estimated, &self.config),
            series: summary::bin_series(&estimated),
            distance_stats: summary::distance_stats(&estimated),
            clean_stats,
            calibration: self.model.calibration(),
        };
        (report, estimated)
    }

    /// The pipeline's configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{ProximityZone, SignalStrength};

    fn scenario_records() -> Vec<RawRecord> {
        vec![
            RawRecord::new("2025-03-01T10:00:00Z", "AA:BB:CC:DD:EE:FF", "-55")
                .with_display_name("HomeNet")
                .with_channel("6"),
            RawRecord::new("2025-03-01T10:00:01Z", "AA:BB:CC:DD:EE:FF", "-55")
                .with_display_name("HomeNet")
                .with_channel("6"),
        ]
    }

    #[test]
    fn test_reference_scenario() {
        // Two sightings at the reference power with default calibration:
        // exactly 1 meter, Very Close, Medium signal (-55 is not > -50).
        let pipeline = AnalysisPipeline::with_defaults();
        let report = pipeline.run(&scenario_records());

        assert_eq!(report.summaries.len(), 1);
        let s = &report.summaries[0];
        assert_eq!(s.device_id, "AA:BB:CC:DD:EE:FF");
        assert_eq!(s.distance_avg_m, 1.0);
        assert_eq!(s.proximity, ProximityZone::VeryClose);
        assert_eq!(s.signal, SignalStrength::Medium);
        assert_eq!(s.packet_count, 2);
    }

    #[test]
    fn test_empty_input_is_valid() {
        let pipeline = AnalysisPipeline::with_defaults();
        let report = pipeline.run(&[]);

        assert!(report.is_empty());
        assert!(report.series.is_empty());
        assert!(report.distance_stats.is_empty());
        assert_eq!(report.clean_stats.retained, 0);
    }

    #[test]
    fn test_all_records_rejected_is_valid() {
        let pipeline = AnalysisPipeline::with_defaults();
        let records = vec![
            RawRecord::new("2025-03-01T10:00:00Z", "a", "-10"), // out of band
            RawRecord::new("junk", "b", "-60"),                 // bad timestamp
        ];

        let report = pipeline.run(&records);
        assert!(report.is_empty());
        assert_eq!(report.clean_stats.dropped(), 2);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let pipeline = AnalysisPipeline::with_defaults();
        let records = scenario_records();

        let first = pipeline.run(&records);
        let second = pipeline.run(&records);

        assert_eq!(first.summaries, second.summaries);
        assert_eq!(first.series, second.series);
        assert_eq!(first.distance_stats, second.distance_stats);
        assert_eq!(first.clean_stats, second.clean_stats);
    }

    #[test]
    fn test_run_detailed_exposes_timeline() {
        let pipeline = AnalysisPipeline::with_defaults();
        let (report, timeline) = pipeline.run_detailed(&scenario_records());

        assert_eq!(timeline.len(), 2);
        assert!(timeline.iter().all(|o| o.distance_m == 1.0));
        assert_eq!(report.summaries.len(), 1);
    }

    #[test]
    fn test_calibration_flows_into_distances() {
        let config = AnalysisConfig::default();
        let calibration = Calibration::new(-60.0, 2.0);
        let pipeline = AnalysisPipeline::new(config, calibration);

        let records = vec![RawRecord::new("2025-03-01T10:00:00Z", "a", "-60")];
        let report = pipeline.run(&records);

        assert_eq!(report.summaries[0].distance_avg_m, 1.0);
        assert_eq!(report.calibration, calibration);
    }
}
