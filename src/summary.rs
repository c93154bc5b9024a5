// Vicinity - RSSI proximity analysis
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Per-device aggregation and classification.
//!
//! Two independent views over the same distance-augmented observations:
//!
//! 1. One [`DeviceSummary`] row per device over the whole window, sorted
//!    ascending by mean distance (closest first).
//! 2. A per-device, per-time-bin mean-distance series
//!    ([`BinPoint`]) with variability statistics across bins
//!    ([`DeviceDistanceStats`]).
//!
//! A device with zero retained observations simply does not appear; rows are
//! never zero-filled.

use crate::config::AnalysisConfig;
use crate::distance::round2;
use crate::observation::DistanceObservation;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// Qualitative proximity zone derived from a device's mean distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityZone {
    VeryClose,
    Close,
    Medium,
    Far,
}

impl ProximityZone {
    /// Classify a mean distance. Thresholds are exclusive upper bounds,
    /// evaluated in order, first match wins.
    pub fn from_mean_distance(distance_m: f64) -> Self {
        if distance_m < 2.0 {
            ProximityZone::VeryClose
        } else if distance_m < 5.0 {
            ProximityZone::Close
        } else if distance_m < 10.0 {
            ProximityZone::Medium
        } else {
            ProximityZone::Far
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProximityZone::VeryClose => "Very Close",
            ProximityZone::Close => "Close",
            ProximityZone::Medium => "Medium",
            ProximityZone::Far => "Far",
        }
    }
}

impl fmt::Display for ProximityZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Qualitative signal class derived from a device's mean smoothed RSSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalStrength {
    Strong,
    Medium,
    Weak,
}

impl SignalStrength {
    /// Classify a mean RSSI. First match wins: `> -50` is Strong,
    /// `> -70` Medium, the rest Weak.
    pub fn from_mean_rssi(rssi_dbm: f64) -> Self {
        if rssi_dbm > -50.0 {
            SignalStrength::Strong
        } else if rssi_dbm > -70.0 {
            SignalStrength::Medium
        } else {
            SignalStrength::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStrength::Strong => "Strong",
            SignalStrength::Medium => "Medium",
            SignalStrength::Weak => "Weak",
        }
    }
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One summary row per device over the analyzed window.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSummary {
    pub device_id: String,
    /// Most frequent display name; ties broken by first encounter.
    pub display_name: String,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    /// `last_seen - first_seen` in minutes, unfloored.
    pub duration_minutes: f64,
    pub packet_count: usize,
    /// Packets per minute with the rate floor applied to the denominator.
    pub packets_per_minute: f64,
    /// Distinct channels, sorted ascending. Empty when the source reported
    /// none.
    pub channels: Vec<u32>,
    /// Min/max/mean over the smoothed RSSI series, dBm.
    pub rssi_min_dbm: f64,
    pub rssi_max_dbm: f64,
    pub rssi_avg_dbm: f64,
    /// Min/max/mean over the distance estimates, meters.
    pub distance_min_m: f64,
    pub distance_max_m: f64,
    pub distance_avg_m: f64,
    pub proximity: ProximityZone,
    pub signal: SignalStrength,
}

impl DeviceSummary {
    /// The channel set rendered the way reports expect it: sorted,
    /// comma-joined, `"Unknown"` when the source never reported a channel.
    pub fn channel_list(&self) -> String {
        if self.channels.is_empty() {
            "Unknown".to_string()
        } else {
            self.channels
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

/// Mean distance of one device inside one time bin.
#[derive(Debug, Clone, PartialEq)]
pub struct BinPoint {
    pub device_id: String,
    pub time_bin: DateTime<Utc>,
    pub distance_m: f64,
}

/// Distance variability of one device across its time bins.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceDistanceStats {
    pub device_id: String,
    pub display_name: String,
    /// Number of occupied time bins.
    pub time_points: usize,
    pub min_distance_m: f64,
    pub max_distance_m: f64,
    pub avg_distance_m: f64,
    /// Sample standard deviation across bins; `None` below two bins.
    pub std_distance_m: Option<f64>,
    pub range_m: f64,
}

/// Build the per-device summary table, sorted ascending by mean distance.
pub fn summarize_devices(
    observations: &[DistanceObservation],
    config: &AnalysisConfig,
) -> Vec<DeviceSummary> {
    let mut summaries: Vec<DeviceSummary> = partition(observations)
        .into_iter()
        .map(|(device_id, group)| summarize_device(device_id, &group, config))
        .collect();

    summaries.sort_by(|a, b| {
        a.distance_avg_m
            .partial_cmp(&b.distance_avg_m)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.device_id.cmp(&b.device_id))
    });
    summaries
}

/// Build the per-device per-time-bin mean-distance series, sorted by device
/// then bin.
pub fn bin_series(observations: &[DistanceObservation]) -> Vec<BinPoint> {
    let mut bins: BTreeMap<(&str, DateTime<Utc>), (f64, usize)> = BTreeMap::new();

    for obs in observations {
        let entry = bins.entry((obs.device_id(), obs.time_bin)).or_insert((0.0, 0));
        entry.0 += obs.distance_m;
        entry.1 += 1;
    }

    bins.into_iter()
        .map(|((device_id, time_bin), (sum, count))| BinPoint {
            device_id: device_id.to_string(),
            time_bin,
            distance_m: sum / count as f64,
        })
        .collect()
}

/// Build per-device distance variability statistics from the binned series,
/// sorted by device identifier.
pub fn distance_stats(observations: &[DistanceObservation]) -> Vec<DeviceDistanceStats> {
    let series = bin_series(observations);

    let mut per_device: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for point in &series {
        per_device
            .entry(point.device_id.as_str())
            .or_default()
            .push(point.distance_m);
    }

    let names: HashMap<&str, String> = partition(observations)
        .into_iter()
        .map(|(device_id, group)| (device_id, representative_name(&group)))
        .collect();

    per_device
        .into_iter()
        .map(|(device_id, distances)| {
            let min = fold_min(&distances);
            let max = fold_max(&distances);
            DeviceDistanceStats {
                device_id: device_id.to_string(),
                display_name: names.get(device_id).cloned().unwrap_or_default(),
                time_points: distances.len(),
                min_distance_m: round2(min),
                max_distance_m: round2(max),
                avg_distance_m: round2(mean(&distances)),
                std_distance_m: sample_std(&distances).map(round2),
                range_m: round2(max - min),
            }
        })
        .collect()
}

fn summarize_device(
    device_id: &str,
    group: &[&DistanceObservation],
    config: &AnalysisConfig,
) -> DeviceSummary {
    let first_seen = group
        .iter()
        .map(|o| o.observation.received_at)
        .min()
        .expect("group is never empty");
    let last_seen = group
        .iter()
        .map(|o| o.observation.received_at)
        .max()
        .expect("group is never empty");

    let duration_minutes = (last_seen - first_seen).num_milliseconds() as f64 / 60_000.0;
    let packet_count = group.len();
    let packets_per_minute =
        packet_count as f64 / duration_minutes.max(config.rate_floor_minutes);

    let channels: Vec<u32> = group
        .iter()
        .filter_map(|o| o.observation.channel)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rssi: Vec<f64> = group.iter().map(|o| o.rssi_smoothed).collect();
    let distance: Vec<f64> = group.iter().map(|o| o.distance_m).collect();

    let distance_avg_m = mean(&distance);
    let rssi_avg_dbm = mean(&rssi);

    DeviceSummary {
        device_id: device_id.to_string(),
        display_name: representative_name(group),
        first_seen,
        last_seen,
        duration_minutes,
        packet_count,
        packets_per_minute,
        channels,
        rssi_min_dbm: fold_min(&rssi),
        rssi_max_dbm: fold_max(&rssi),
        rssi_avg_dbm,
        distance_min_m: fold_min(&distance),
        distance_max_m: fold_max(&distance),
        distance_avg_m,
        proximity: ProximityZone::from_mean_distance(distance_avg_m),
        signal: SignalStrength::from_mean_rssi(rssi_avg_dbm),
    }
}

/// Partition observations by device, preserving time order within each
/// group. `BTreeMap` keeps the device order deterministic.
fn partition(observations: &[DistanceObservation]) -> BTreeMap<&str, Vec<&DistanceObservation>> {
    let mut groups: BTreeMap<&str, Vec<&DistanceObservation>> = BTreeMap::new();
    for obs in observations {
        groups.entry(obs.device_id()).or_default().push(obs);
    }
    groups
}

/// Statistical mode of the display names, ties broken by first encounter.
fn representative_name(group: &[&DistanceObservation]) -> String {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, obs) in group.iter().enumerate() {
        let entry = counts
            .entry(obs.observation.display_name.as_str())
            .or_insert((0, index));
        entry.0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(name, _)| name.to_string())
        .unwrap_or_default()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn fold_min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn fold_max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Sample standard deviation (n - 1 denominator); `None` below two values.
fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.max(0.0).sqrt())
}
