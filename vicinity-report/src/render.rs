// Vicinity Report - CSV rendering
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! CSV rendering of analysis results.
//!
//! Column names and numeric formatting match the capture toolchain's
//! existing consumers: RSSI, durations, and rates carry one decimal,
//! distances two. An empty report still produces both files with headers
//! so downstream tooling sees a well-formed (if empty) table.

use crate::input::ReportError;
use std::path::Path;
use vicinity::{DeviceDistanceStats, DeviceSummary};

const DEVICE_TABLE_HEADER: [&str; 16] = [
    "BSSID",
    "SSID/Device_Name",
    "First_Seen",
    "Last_Seen",
    "Duration_Minutes",
    "Total_Packets",
    "Packets_Per_Minute",
    "Channel(s)",
    "RSSI_Min_dBm",
    "RSSI_Max_dBm",
    "RSSI_Avg_dBm",
    "Distance_Min_m",
    "Distance_Max_m",
    "Distance_Avg_m",
    "Proximity_Zone",
    "Signal_Strength",
];

const DISTANCE_SUMMARY_HEADER: [&str; 8] = [
    "BSSID",
    "SSID",
    "Time_Points",
    "Min_Distance_m",
    "Max_Distance_m",
    "Avg_Distance_m",
    "Std_Distance_m",
    "Distance_Range_m",
];

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write the per-device summary table, one row per device, already sorted
/// closest-first by the pipeline.
pub fn write_device_table(path: &Path, summaries: &[DeviceSummary]) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(DEVICE_TABLE_HEADER)?;

    for s in summaries {
        writer.write_record([
            s.device_id.as_str(),
            s.display_name.as_str(),
            &s.first_seen.format(TIME_FORMAT).to_string(),
            &s.last_seen.format(TIME_FORMAT).to_string(),
            &format!("{:.1}", s.duration_minutes),
            &s.packet_count.to_string(),
            &format!("{:.1}", s.packets_per_minute),
            &s.channel_list(),
            &format!("{:.1}", s.rssi_min_dbm),
            &format!("{:.1}", s.rssi_max_dbm),
            &format!("{:.1}", s.rssi_avg_dbm),
            &format!("{:.2}", s.distance_min_m),
            &format!("{:.2}", s.distance_max_m),
            &format!("{:.2}", s.distance_avg_m),
            s.proximity.as_str(),
            s.signal.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the per-device distance variability summary.
pub fn write_distance_summary(
    path: &Path,
    stats: &[DeviceDistanceStats],
) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(DISTANCE_SUMMARY_HEADER)?;

    for s in stats {
        let std = s
            .std_distance_m
            .map(|v| format!("{:.2}", v))
            .unwrap_or_default();

        writer.write_record([
            s.device_id.as_str(),
            s.display_name.as_str(),
            &s.time_points.to_string(),
            &format!("{:.2}", s.min_distance_m),
            &format!("{:.2}", s.max_distance_m),
            &format!("{:.2}", s.avg_distance_m),
            &std,
            &format!("{:.2}", s.range_m),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
