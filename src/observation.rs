// Vicinity - RSSI proximity analysis
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Observation types
//!
//! This module defines the record types flowing through the pipeline:
//! - Raw, unvalidated records as a source presents them
//! - Validated observations
//! - Smoothed and distance-augmented observations

use chrono::{DateTime, Utc};

/// One unvalidated row from an observation source.
///
/// Every field is optional and untyped: a CSV cell, a datagram field or a
/// missing column all map onto `Option<String>`. `None` means the field was
/// absent from the source entirely; `Some("")` means it was present but
/// empty. The cleaner relies on this distinction for display names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    /// Receiver wall-clock timestamp, ISO 8601 / RFC 3339.
    pub received_at: Option<String>,
    /// Stable device identifier (hardware address).
    pub device_id: Option<String>,
    /// Advertised human-readable name, if any.
    pub display_name: Option<String>,
    /// Signal strength in dBm.
    pub rssi: Option<String>,
    /// Radio channel number.
    pub channel: Option<String>,
    /// Identifier of the capturing node (passthrough metadata).
    pub source_device_tag: Option<String>,
    /// The capturing node's own clock (passthrough metadata).
    pub source_clock: Option<String>,
}

impl RawRecord {
    /// Create a record carrying the three required fields.
    pub fn new(received_at: &str, device_id: &str, rssi: &str) -> Self {
        Self {
            received_at: Some(received_at.to_string()),
            device_id: Some(device_id.to_string()),
            rssi: Some(rssi.to_string()),
            ..Self::default()
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_string());
        self
    }

    /// Set the radio channel.
    pub fn with_channel(mut self, channel: &str) -> Self {
        self.channel = Some(channel.to_string());
        self
    }

    /// Set the passthrough source metadata.
    pub fn with_source(mut self, device_tag: &str, clock: &str) -> Self {
        self.source_device_tag = Some(device_tag.to_string());
        self.source_clock = Some(clock.to_string());
        self
    }
}

/// A validated radio sighting.
///
/// Produced by the cleaner; immutable from then on. `rssi` is guaranteed to
/// lie within the configured admissible band and `display_name` has had the
/// sentinel substitution applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Receiver wall-clock time of the sighting.
    pub received_at: DateTime<Utc>,
    /// Stable device identifier; primary grouping key.
    pub device_id: String,
    /// Display name, never empty (sentinel-substituted).
    pub display_name: String,
    /// Signal strength in dBm.
    pub rssi: f64,
    /// Radio channel, absent when the source does not report one.
    pub channel: Option<u32>,
}

/// An observation with its denoised RSSI value and time bin.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedObservation {
    pub observation: Observation,
    /// Trailing-window median of the device's RSSI at this point in time.
    pub rssi_smoothed: f64,
    /// Receive time floored to the configured bin width.
    pub time_bin: DateTime<Utc>,
}

/// A smoothed observation augmented with a distance estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceObservation {
    pub observation: Observation,
    pub rssi_smoothed: f64,
    pub time_bin: DateTime<Utc>,
    /// Estimated receiver-to-device distance in meters, non-negative.
    pub distance_m: f64,
}

impl DistanceObservation {
    /// Attach a distance estimate to a smoothed observation.
    pub fn new(smoothed: SmoothedObservation, distance_m: f64) -> Self {
        Self {
            observation: smoothed.observation,
            rssi_smoothed: smoothed.rssi_smoothed,
            time_bin: smoothed.time_bin,
            distance_m,
        }
    }

    /// The device this sighting belongs to.
    pub fn device_id(&self) -> &str {
        &self.observation.device_id
    }
}
