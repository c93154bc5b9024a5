//! # Vicinity - RSSI proximity analysis
//!
//! Estimates the time-varying distance between a fixed receiver and nearby
//! transmitting devices from noisy signal-strength (RSSI) observations, and
//! summarizes each device's behavior over an observation window.
//!
//! ## Pipeline
//!
//! - **Cleaner**: drops malformed or out-of-band records
//! - **Smoother**: per-device trailing-window median over RSSI
//! - **Distance model**: log-distance path-loss estimation
//! - **Summary**: per-device and per-time-bin aggregation with
//!   proximity/signal classification
//!
//! ## Quick Start
//!
//! ```rust
//! use vicinity::{AnalysisPipeline, RawRecord};
//!
//! let records = vec![
//!     RawRecord::new("2025-03-01T10:00:00Z", "AA:BB:CC:DD:EE:FF", "-55"),
//!     RawRecord::new("2025-03-01T10:00:01Z", "AA:BB:CC:DD:EE:FF", "-55"),
//! ];
//!
//! let pipeline = AnalysisPipeline::with_defaults();
//! let report = pipeline.run(&records);
//!
//! let device = &report.summaries[0];
//! assert_eq!(device.distance_avg_m, 1.0);
//! assert_eq!(device.proximity.as_str(), "Very Close");
//! ```
//!
//! ## Modules
//!
//! - [`observation`]: record types flowing through the pipeline
//! - [`cleaner`]: ingestion validation
//! - [`smoother`]: per-device temporal smoothing
//! - [`distance`]: path-loss distance model
//! - [`summary`]: aggregation and classification
//! - [`pipeline`]: orchestration
//! - [`calibration`]: path-loss calibration loading

// Modules
pub mod calibration;
pub mod cleaner;
pub mod config;
pub mod distance;
pub mod error;
pub mod observation;
pub mod pipeline;
pub mod smoother;
pub mod summary;

// Re-exports for convenient access
pub use calibration::{Calibration, DEFAULT_PATH_LOSS_EXPONENT, DEFAULT_REFERENCE_POWER};
pub use cleaner::{CleanStats, HIDDEN_NAME, UNKNOWN_NAME};
pub use config::AnalysisConfig;
pub use distance::DistanceModel;
pub use error::{Result, VicinityError};
pub use observation::{DistanceObservation, Observation, RawRecord, SmoothedObservation};
pub use pipeline::{AnalysisPipeline, AnalysisReport};
pub use summary::{
    BinPoint, DeviceDistanceStats, DeviceSummary, ProximityZone, SignalStrength,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
