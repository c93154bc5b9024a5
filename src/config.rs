// Vicinity - RSSI proximity analysis
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Analysis pipeline configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the signal-to-distance pipeline.
///
/// One value per run, immutable once the pipeline is constructed. The
/// defaults reproduce the standard capture setup and should rarely need
/// changing outside of experiments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Lower edge of the admissible RSSI band, dBm (inclusive).
    pub rssi_min_dbm: f64,

    /// Upper edge of the admissible RSSI band, dBm (inclusive).
    pub rssi_max_dbm: f64,

    /// Width of the trailing smoothing window, milliseconds.
    pub smoothing_window_ms: u64,

    /// Width of the aggregation time bin, milliseconds.
    pub time_bin_ms: u64,

    /// Floor applied to the duration (minutes) when computing packet rates.
    /// Keeps the rate finite for devices seen only briefly.
    pub rate_floor_minutes: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rssi_min_dbm: -95.0,
            rssi_max_dbm: -20.0,
            smoothing_window_ms: 10_000, // 10 seconds
            time_bin_ms: 2_000,          // 2 seconds
            rate_floor_minutes: 1.0,
        }
    }
}

impl AnalysisConfig {
    /// Check whether an RSSI value lies within the admissible band.
    pub fn rssi_in_band(&self, rssi: f64) -> bool {
        rssi >= self.rssi_min_dbm && rssi <= self.rssi_max_dbm
    }
}
