// Vicinity - RSSI proximity analysis
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Log-distance path-loss model.
//!
//! Maps a smoothed RSSI value to a distance estimate:
//!
//! ```text
//! distance_m = 10 ^ ((P0 - rssi) / (10 * n))
//! ```
//!
//! where `P0` is the reference power at 1 meter and `n` the environment
//! exponent. Output is not clamped: weak signals can map to arbitrarily
//! large distances and strong ones to near zero. Whether those extremes are
//! physically plausible is a calibration concern, not a pipeline one.

use crate::calibration::Calibration;
use crate::observation::{DistanceObservation, SmoothedObservation};

/// Stateless distance estimator bound to one run's calibration.
#[derive(Debug, Clone, Copy)]
pub struct DistanceModel {
    calibration: Calibration,
}

impl DistanceModel {
    /// Create a model from calibration constants.
    pub fn new(calibration: Calibration) -> Self {
        Self { calibration }
    }

    /// Estimate the distance in meters for a smoothed RSSI value,
    /// rounded to 2 decimal places.
    pub fn distance_m(&self, rssi_smoothed: f64) -> f64 {
        let exponent = (self.calibration.reference_power - rssi_smoothed)
            / (10.0 * self.calibration.path_loss_exponent);
        round2(10f64.powf(exponent))
    }

    /// Augment a smoothed observation with its distance estimate.
    pub fn estimate(&self, smoothed: SmoothedObservation) -> DistanceObservation {
        let distance_m = self.distance_m(smoothed.rssi_smoothed);
        DistanceObservation::new(smoothed, distance_m)
    }

    /// The calibration this model was built with.
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }
}

impl Default for DistanceModel {
    fn default() -> Self {
        Self::new(Calibration::default())
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
