//! Decoding IDs back into their fields
//!
//! The version is always read from the ID itself; there is no way to
//! decode under a caller-chosen layout.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::SnowflakeError;
use crate::layout::{lookup, mask, VERSION_BITS, VERSION_SHIFT};

/// Fields of an ID under the layout named by its version bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedId {
    pub version: u8,
    /// Raw ticks since the layout's epoch
    pub timestamp: u64,
    pub node_id: u64,
    pub sequence: u64,
    /// `epoch + timestamp * time_unit`
    pub time: DateTime<Utc>,
}

impl fmt::Display for DecodedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Version: {}, Time: {}, NodeID: {}, Sequence: {}",
            self.version,
            self.time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            self.node_id,
            self.sequence
        )
    }
}

/// Version stored in the top bits of `id`, whatever its layout
#[inline(always)]
pub const fn version_of(id: u64) -> u8 {
    ((id >> VERSION_SHIFT) & mask(VERSION_BITS)) as u8
}

/// Decode `id` using the layout its version bits name
pub fn decode(id: u64) -> Result<DecodedId, SnowflakeError> {
    let version = version_of(id);
    let layout = lookup(version)?;
    let (timestamp, node_id, sequence) = layout.decompose(id);
    let time = layout
        .time_of(timestamp)
        .ok_or(SnowflakeError::TimestampOverflow {
            version,
            max: layout.max_timestamp(),
        })?;

    Ok(DecodedId {
        version,
        timestamp,
        node_id,
        sequence,
        time,
    })
}
