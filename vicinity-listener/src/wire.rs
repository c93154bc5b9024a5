// Vicinity Listener - Datagram format
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Capture-node datagram format.
//!
//! A capture node reports one sighting per UDP datagram as six
//! comma-separated fields:
//!
//! ```text
//! node_id,ssid,bssid,rssi,channel,node_timestamp
//! ```
//!
//! Fields are kept as raw strings; the analysis pipeline owns validation.
//! A datagram with the wrong field count is rejected here because there is
//! no way to tell which fields it carries.

use thiserror::Error;

const FIELD_COUNT: usize = 6;

/// Errors while parsing a capture datagram.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("Expected {expected} fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    #[error("Datagram is not valid UTF-8")]
    NotUtf8,
}

/// One parsed capture datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    /// Identifier of the capturing node.
    pub source_device_tag: String,
    /// Advertised network name; may be empty for hidden networks.
    pub display_name: String,
    /// Hardware address of the sighted device.
    pub device_id: String,
    /// Signal strength as reported, dBm.
    pub rssi: String,
    /// Radio channel as reported.
    pub channel: String,
    /// The capturing node's own clock.
    pub source_clock: String,
}

impl Datagram {
    /// Parse a datagram payload.
    pub fn parse(text: &str) -> Result<Self, WireError> {
        let fields: Vec<&str> = text.trim().split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(WireError::FieldCount {
                expected: FIELD_COUNT,
                actual: fields.len(),
            });
        }

        Ok(Self {
            source_device_tag: fields[0].trim().to_string(),
            display_name: fields[1].trim().to_string(),
            device_id: fields[2].trim().to_string(),
            rssi: fields[3].trim().to_string(),
            channel: fields[4].trim().to_string(),
            source_clock: fields[5].trim().to_string(),
        })
    }

    /// Parse raw datagram bytes.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        let text = std::str::from_utf8(bytes).map_err(|_| WireError::NotUtf8)?;
        Self::parse(text)
    }
}
