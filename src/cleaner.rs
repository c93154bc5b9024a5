// Vicinity - RSSI proximity analysis
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Ingestion validation and cleaning.
//!
//! The cleaner turns raw source rows into validated [`Observation`]s. A row
//! survives only if its timestamp, device identifier, and RSSI all parse and
//! the RSSI lies inside the admissible band. Rejections are counted, never
//! reported individually, and never fatal.

use crate::config::AnalysisConfig;
use crate::observation::{Observation, RawRecord};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Display-name sentinel for sources that do not report a name at all.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Display-name sentinel for devices that report an empty name. Distinct
/// from [`UNKNOWN_NAME`]: a hidden network is not the same as a source that
/// cannot see names.
pub const HIDDEN_NAME: &str = "Hidden/Unknown";

/// Drop diagnostics from one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    /// Records that survived validation.
    pub retained: usize,
    /// Records missing a required field (timestamp, device id, or RSSI).
    pub missing_required: usize,
    /// Records whose timestamp did not parse.
    pub bad_timestamp: usize,
    /// Records whose RSSI did not parse as a number.
    pub bad_rssi: usize,
    /// Records whose RSSI parsed but fell outside the admissible band.
    pub out_of_range: usize,
}

impl CleanStats {
    /// Total number of dropped records.
    pub fn dropped(&self) -> usize {
        self.missing_required + self.bad_timestamp + self.bad_rssi + self.out_of_range
    }
}

/// Validate and clean a batch of raw records.
///
/// Returns the surviving observations sorted ascending by receive time
/// (stable, so source order is preserved within equal timestamps) together
/// with the drop statistics.
pub fn clean(records: &[RawRecord], config: &AnalysisConfig) -> (Vec<Observation>, CleanStats) {
    let mut stats = CleanStats::default();
    let mut observations = Vec::with_capacity(records.len());

    for record in records {
        match validate(record, config, &mut stats) {
            Some(observation) => observations.push(observation),
            None => continue,
        }
    }

    observations.sort_by_key(|o| o.received_at);
    stats.retained = observations.len();

    log::debug!(
        "cleaned {} records: {} retained, {} dropped",
        records.len(),
        stats.retained,
        stats.dropped()
    );

    (observations, stats)
}

fn validate(
    record: &RawRecord,
    config: &AnalysisConfig,
    stats: &mut CleanStats,
) -> Option<Observation> {
    let (raw_time, device_id, raw_rssi) = match (
        non_empty(record.received_at.as_deref()),
        non_empty(record.device_id.as_deref()),
        non_empty(record.rssi.as_deref()),
    ) {
        (Some(t), Some(d), Some(r)) => (t, d, r),
        _ => {
            stats.missing_required += 1;
            return None;
        }
    };

    let received_at = match parse_timestamp(raw_time) {
        Some(t) => t,
        None => {
            stats.bad_timestamp += 1;
            return None;
        }
    };

    let rssi = match raw_rssi.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            stats.bad_rssi += 1;
            return None;
        }
    };

    if !config.rssi_in_band(rssi) {
        stats.out_of_range += 1;
        return None;
    }

    let display_name = match record.display_name.as_deref() {
        None => UNKNOWN_NAME.to_string(),
        Some(name) if name.trim().is_empty() => HIDDEN_NAME.to_string(),
        Some(name) => name.to_string(),
    };

    // Channel stays absent when unparseable, no sentinel coercion.
    let channel = record
        .channel
        .as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u32);

    Some(Observation {
        received_at,
        device_id: device_id.to_string(),
        display_name,
        rssi,
        channel,
    })
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.filter(|s| !s.trim().is_empty())
}

/// Parse a receiver timestamp.
///
/// Sources emit either full RFC 3339 (offset-qualified) or naive ISO 8601;
/// naive timestamps are taken as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    None
}
