// Vicinity - RSSI proximity analysis
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Per-device temporal smoothing.
//!
//! Suppresses short-term RSSI noise with a trailing, time-based median:
//! every observation receives the median of its device's RSSI values inside
//! `(t - window, t]`. The window is causal (never reads later observations)
//! and per-element (the timeline keeps its density, only values change).
//!
//! State is keyed by device; devices never share a window. Each device's
//! samples live in a `VecDeque` pruned at the trailing edge as time
//! advances, one pass over the time-sorted input.

use crate::config::AnalysisConfig;
use crate::observation::{Observation, SmoothedObservation};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};

/// A sample inside a device's trailing window.
#[derive(Debug, Clone, Copy)]
struct Sample {
    timestamp_ms: i64,
    rssi: f64,
}

/// Smooth a time-sorted batch of observations.
///
/// Input must be sorted ascending by `received_at` (the cleaner guarantees
/// this); output preserves that order. Also stamps each observation's time
/// bin.
pub fn smooth(
    observations: Vec<Observation>,
    config: &AnalysisConfig,
) -> Vec<SmoothedObservation> {
    let window_ms = config.smoothing_window_ms as i64;
    let mut windows: HashMap<String, VecDeque<Sample>> = HashMap::new();
    let mut smoothed = Vec::with_capacity(observations.len());

    for observation in observations {
        let timestamp_ms = observation.received_at.timestamp_millis();
        let samples = windows.entry(observation.device_id.clone()).or_default();

        samples.push_back(Sample {
            timestamp_ms,
            rssi: observation.rssi,
        });

        // Trailing edge is exclusive: a sample at exactly t - window leaves.
        while let Some(front) = samples.front() {
            if front.timestamp_ms <= timestamp_ms - window_ms {
                samples.pop_front();
            } else {
                break;
            }
        }

        let mut values: Vec<f64> = samples.iter().map(|s| s.rssi).collect();
        let rssi_smoothed = median(&mut values);
        let time_bin = floor_to_bin(observation.received_at, config.time_bin_ms);

        smoothed.push(SmoothedObservation {
            observation,
            rssi_smoothed,
            time_bin,
        });
    }

    smoothed
}

/// Median with standard semantics: midpoint average for even counts.
/// Callers never pass an empty slice (every window holds at least the
/// current sample).
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

/// Floor a timestamp to the start of its bin.
pub fn floor_to_bin(t: DateTime<Utc>, bin_ms: u64) -> DateTime<Utc> {
    let bin_ms = bin_ms.max(1) as i64;
    let floored = t.timestamp_millis().div_euclid(bin_ms) * bin_ms;
    DateTime::from_timestamp_millis(floored).unwrap_or(t)
}
