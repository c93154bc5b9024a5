// Vicinity Report - Observation CSV loading
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Observation CSV loading.
//!
//! Reads a capture file into raw records without validating anything: that
//! is the pipeline's job. The loader is header-aware so that a column that
//! is absent from the file stays `None` on every record, while a column
//! that is present but empty yields `Some("")`; the cleaner tells the two
//! apart when substituting display-name sentinels.

use csv::StringRecord;
use std::path::Path;
use thiserror::Error;
use vicinity::RawRecord;

/// Errors while loading an observation source.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The capture file does not exist. The sole fatal input condition: a
    /// batch run cannot produce output without a source.
    #[error("Observation source not found: {0}")]
    SourceMissing(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Column positions resolved from the header row.
#[derive(Debug, Default, Clone, Copy)]
struct Columns {
    received_at: Option<usize>,
    device_id: Option<usize>,
    display_name: Option<usize>,
    rssi: Option<usize>,
    channel: Option<usize>,
    source_device_tag: Option<usize>,
    source_clock: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut columns = Self::default();
        for (index, name) in headers.iter().enumerate() {
            match name.trim() {
                "timestamp_received" | "received_at" => columns.received_at = Some(index),
                "bssid" | "device_id" => columns.device_id = Some(index),
                "ssid" | "display_name" => columns.display_name = Some(index),
                "rssi" => columns.rssi = Some(index),
                "channel" => columns.channel = Some(index),
                "node_id" => columns.source_device_tag = Some(index),
                "node_timestamp" => columns.source_clock = Some(index),
                _ => {}
            }
        }
        columns
    }
}

/// Load every row of the capture file as a raw record.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, ReportError> {
    if !path.exists() {
        return Err(ReportError::SourceMissing(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let columns = Columns::from_headers(reader.headers()?);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(RawRecord {
            received_at: cell(&row, columns.received_at),
            device_id: cell(&row, columns.device_id),
            display_name: cell(&row, columns.display_name),
            rssi: cell(&row, columns.rssi),
            channel: cell(&row, columns.channel),
            source_device_tag: cell(&row, columns.source_device_tag),
            source_clock: cell(&row, columns.source_clock),
        });
    }

    Ok(records)
}

fn cell(row: &StringRecord, index: Option<usize>) -> Option<String> {
    index.and_then(|i| row.get(i)).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = load_records(Path::new("/nonexistent/rssi_data.csv"));
        assert!(matches!(result, Err(ReportError::SourceMissing(_))));
    }

    #[test]
    fn test_full_capture_row() {
        let file = write_csv(
            "timestamp_received,node_id,ssid,bssid,rssi,channel,node_timestamp\n\
             2025-03-01T10:00:00Z,node-1,HomeNet,AA:BB:CC:DD:EE:FF,-61,6,12345\n",
        );

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.received_at.as_deref(), Some("2025-03-01T10:00:00Z"));
        assert_eq!(r.device_id.as_deref(), Some("AA:BB:CC:DD:EE:FF"));
        assert_eq!(r.display_name.as_deref(), Some("HomeNet"));
        assert_eq!(r.rssi.as_deref(), Some("-61"));
        assert_eq!(r.channel.as_deref(), Some("6"));
        assert_eq!(r.source_device_tag.as_deref(), Some("node-1"));
        assert_eq!(r.source_clock.as_deref(), Some("12345"));
    }

    #[test]
    fn test_absent_column_stays_none() {
        // No ssid column at all: display_name must be None, not Some("").
        let file = write_csv(
            "timestamp_received,bssid,rssi\n\
             2025-03-01T10:00:00Z,AA:BB:CC:DD:EE:FF,-61\n",
        );

        let records = load_records(file.path()).unwrap();
        assert!(records[0].display_name.is_none());
        assert!(records[0].channel.is_none());
    }

    #[test]
    fn test_empty_cell_stays_present() {
        // The ssid column exists but the cell is empty: Some(""), so the
        // cleaner can apply the hidden sentinel rather than the unknown one.
        let file = write_csv(
            "timestamp_received,ssid,bssid,rssi\n\
             2025-03-01T10:00:00Z,,AA:BB:CC:DD:EE:FF,-61\n",
        );

        let records = load_records(file.path()).unwrap();
        assert_eq!(records[0].display_name.as_deref(), Some(""));
    }

    #[test]
    fn test_header_only_file_is_empty_not_error() {
        let file = write_csv("timestamp_received,bssid,rssi\n");
        let records = load_records(file.path()).unwrap();
        assert!(records.is_empty());
    }
}
