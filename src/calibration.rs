// Vicinity - RSSI proximity analysis
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Path-loss calibration parameters.
//!
//! Calibration is loaded once per run from an optional JSON side file and is
//! immutable thereafter. A file that is missing, corrupt, or only partially
//! specified never aborts a run: the conservative defaults take over and a
//! warning is logged.

use crate::error::{Result, VicinityError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default reference power at 1 meter, dBm.
pub const DEFAULT_REFERENCE_POWER: f64 = -55.0;

/// Default path-loss exponent (indoor, obstructed).
pub const DEFAULT_PATH_LOSS_EXPONENT: f64 = 3.0;

/// Calibration constants of the log-distance path-loss model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Expected RSSI at 1 meter, dBm.
    #[serde(rename = "P0")]
    pub reference_power: f64,
    /// Environment-dependent attenuation exponent.
    #[serde(rename = "n")]
    pub path_loss_exponent: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            reference_power: DEFAULT_REFERENCE_POWER,
            path_loss_exponent: DEFAULT_PATH_LOSS_EXPONENT,
        }
    }
}

/// Shape of a calibration file entry. Both fields must be present for the
/// entry to be accepted; a partial entry is rejected, never merged.
#[derive(Debug, Deserialize)]
struct CalibrationEntry {
    #[serde(rename = "P0")]
    reference_power: Option<f64>,
    #[serde(rename = "n")]
    path_loss_exponent: Option<f64>,
}

impl Calibration {
    /// Create a calibration from explicit constants.
    pub fn new(reference_power: f64, path_loss_exponent: f64) -> Self {
        Self {
            reference_power,
            path_loss_exponent,
        }
    }

    /// Parse a calibration from JSON text.
    ///
    /// Accepts either a single object or an array of objects; only the
    /// first array entry is honored. Returns an error when the text is not
    /// valid JSON or when either parameter is missing.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| VicinityError::InvalidCalibration(e.to_string()))?;

        let entry_value = match value {
            serde_json::Value::Array(entries) => entries.into_iter().next().ok_or_else(|| {
                VicinityError::InvalidCalibration("calibration array is empty".to_string())
            })?,
            other => other,
        };

        let entry: CalibrationEntry = serde_json::from_value(entry_value)
            .map_err(|e| VicinityError::InvalidCalibration(e.to_string()))?;

        match (entry.reference_power, entry.path_loss_exponent) {
            (Some(p0), Some(n)) => Ok(Self::new(p0, n)),
            _ => Err(VicinityError::InvalidCalibration(
                "both P0 and n are required".to_string(),
            )),
        }
    }

    /// Load a calibration file, returning an error for a corrupt or partial
    /// file. A missing file is not an error here; see [`Self::load_or_default`].
    pub fn try_load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load a calibration file with fallback semantics: missing file falls
    /// back silently, a corrupt or partial file falls back with a warning.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::try_load(path) {
            Ok(calibration) => {
                log::info!(
                    "using calibration: P0={} dBm, n={}",
                    calibration.reference_power,
                    calibration.path_loss_exponent
                );
                calibration
            }
            Err(e) => {
                log::warn!("could not parse {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
