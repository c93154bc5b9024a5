// Vicinity Listener - Append-only CSV sink
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Append-only CSV sink for received observations.
//!
//! One row per datagram, stamped with the receiver's wall clock. The file
//! is opened per append so the sink survives rotation or deletion of the
//! file underneath it, and the header is written only when the file is new
//! or empty. Each row is flushed as a unit; a concurrent reader sees whole
//! rows plus at most a partial trailing line, which the analysis side
//! already tolerates.

use crate::wire::Datagram;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;

const HEADER: [&str; 7] = [
    "timestamp_received",
    "node_id",
    "ssid",
    "bssid",
    "rssi",
    "channel",
    "node_timestamp",
];

/// Errors while appending to the sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Append-only observation sink.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Create a sink writing to the given path. The file is created lazily
    /// on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The sink's file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one observation row stamped with the given receive time.
    pub fn append(&self, received_at: &str, datagram: &Datagram) -> Result<(), SinkError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(HEADER)?;
        }

        writer.write_record([
            received_at,
            datagram.source_device_tag.as_str(),
            datagram.display_name.as_str(),
            datagram.device_id.as_str(),
            datagram.rssi.as_str(),
            datagram.channel.as_str(),
            datagram.source_clock.as_str(),
        ])?;
        writer.flush()?;
        Ok(())
    }
}
