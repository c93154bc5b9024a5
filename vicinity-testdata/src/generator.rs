// Vicinity Testdata - Core generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Synthetic observation generation.
//!
//! Devices are described by their true distance from the receiver; RSSI is
//! derived by inverting the log-distance path-loss model and adding
//! Gaussian noise. With a fixed seed the output is fully reproducible.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use std::path::Path;
use thiserror::Error;
use vicinity::{Calibration, RawRecord};

/// Generator configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Start timestamp in milliseconds since the epoch.
    pub start_time_ms: i64,
    /// Interval between samples per device, milliseconds.
    pub sample_interval_ms: u64,
    /// Number of samples per device.
    pub num_samples: usize,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_time_ms: 1_740_000_000_000, // 2025-02-19 21:20:00 UTC
            sample_interval_ms: 1_000,        // 1 second
            num_samples: 60,                  // 1 minute
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set start timestamp.
    pub fn with_start_time_ms(mut self, timestamp_ms: i64) -> Self {
        self.start_time_ms = timestamp_ms;
        self
    }

    /// Set sample interval.
    pub fn with_sample_interval_ms(mut self, interval_ms: u64) -> Self {
        self.sample_interval_ms = interval_ms;
        self
    }

    /// Set number of samples per device.
    pub fn with_num_samples(mut self, n: usize) -> Self {
        self.num_samples = n;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A simulated transmitting device.
#[derive(Debug, Clone)]
pub struct DeviceProfile {
    /// Hardware address reported for the device.
    pub device_id: String,
    /// Advertised name; `None` simulates a source without name support,
    /// `Some("")` a hidden network.
    pub display_name: Option<String>,
    /// Radio channel reported for the device.
    pub channel: Option<u32>,
    /// True receiver-to-device distance in meters.
    pub distance_m: f64,
    /// Standard deviation of the RSSI noise, dB.
    pub noise_std: f64,
}

impl DeviceProfile {
    /// Create a device at a fixed true distance.
    pub fn new(device_id: &str, distance_m: f64) -> Self {
        Self {
            device_id: device_id.to_string(),
            display_name: None,
            channel: None,
            distance_m,
            noise_std: 0.0,
        }
    }

    /// Set the advertised name.
    pub fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_string());
        self
    }

    /// Set the radio channel.
    pub fn with_channel(mut self, channel: u32) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Add Gaussian RSSI noise.
    pub fn with_noise(mut self, std: f64) -> Self {
        self.noise_std = std;
        self
    }

    /// The noiseless RSSI this device produces under the given calibration:
    /// the inverse of the log-distance path-loss model.
    pub fn clean_rssi(&self, calibration: &Calibration) -> f64 {
        calibration.reference_power
            - 10.0 * calibration.path_loss_exponent * self.distance_m.log10()
    }
}

/// Errors while exporting generated data.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Generate raw observation records for a set of device profiles.
///
/// Devices are interleaved per sample tick, mimicking a capture node that
/// sweeps all visible devices each scan.
pub fn generate_records(
    config: &GeneratorConfig,
    profiles: &[DeviceProfile],
    calibration: &Calibration,
) -> Vec<RawRecord> {
    let mut rng: StdRng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let mut records = Vec::with_capacity(config.num_samples * profiles.len());

    for sample in 0..config.num_samples {
        let timestamp_ms =
            config.start_time_ms + (sample as u64 * config.sample_interval_ms) as i64;
        let received_at = format_timestamp(timestamp_ms);

        for profile in profiles {
            let noise = if profile.noise_std > 0.0 {
                Normal::new(0.0, profile.noise_std)
                    .map(|d| d.sample(&mut rng))
                    .unwrap_or(0.0)
            } else {
                0.0
            };
            let rssi = profile.clean_rssi(calibration) + noise;

            let mut record = RawRecord::new(
                &received_at,
                &profile.device_id,
                &format!("{:.1}", rssi),
            )
            .with_source("sim-node", &timestamp_ms.to_string());

            if let Some(ref name) = profile.display_name {
                record = record.with_display_name(name);
            }
            if let Some(channel) = profile.channel {
                record = record.with_channel(&channel.to_string());
            }

            records.push(record);
        }
    }

    records
}

/// Export records as a capture CSV with the standard column layout.
pub fn write_csv(path: &Path, records: &[RawRecord]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "timestamp_received",
        "node_id",
        "ssid",
        "bssid",
        "rssi",
        "channel",
        "node_timestamp",
    ])?;

    for r in records {
        writer.write_record([
            r.received_at.as_deref().unwrap_or(""),
            r.source_device_tag.as_deref().unwrap_or(""),
            r.display_name.as_deref().unwrap_or(""),
            r.device_id.as_deref().unwrap_or(""),
            r.rssi.as_deref().unwrap_or(""),
            r.channel.as_deref().unwrap_or(""),
            r.source_clock.as_deref().unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn format_timestamp(timestamp_ms: i64) -> String {
    let t: DateTime<Utc> = Utc
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap());
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}
