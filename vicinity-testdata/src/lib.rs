// Vicinity Testdata - Synthetic observation generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Vicinity Testdata
//!
//! Synthetic RSSI observation generator for the Vicinity ecosystem.
//!
//! Devices are described by their true distance from the receiver; RSSI
//! values are derived by inverting the path-loss model and adding Gaussian
//! noise, so generated datasets have a known ground truth to test the
//! estimation pipeline against.
//!
//! ## Quick Start
//!
//! ```rust
//! use vicinity::Calibration;
//! use vicinity_testdata::{generate_records, DeviceProfile, GeneratorConfig};
//!
//! let config = GeneratorConfig::new()
//!     .with_num_samples(30)
//!     .with_seed(42);
//!
//! let profiles = vec![
//!     DeviceProfile::new("AA:00:00:00:00:01", 1.5)
//!         .with_display_name("Desk")
//!         .with_channel(6)
//!         .with_noise(1.5),
//! ];
//!
//! let records = generate_records(&config, &profiles, &Calibration::default());
//! assert_eq!(records.len(), 30);
//! ```

mod generator;

pub use generator::{
    generate_records, write_csv, DeviceProfile, ExportError, GeneratorConfig,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
