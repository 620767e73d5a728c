use std::time::Duration;

use thiserror::Error;

/// Represents errors that can occur during Snowflake operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnowflakeError {
    /// The requested or embedded layout version is not in the registry
    #[error("Unsupported layout version {version}")]
    UnsupportedVersion { version: u8 },
    /// Error when node ID exceeds the layout's node-bit capacity
    #[error("Node ID {node_id} is invalid for version {version}. Maximum allowed value is {max}")]
    InvalidNodeId { node_id: u64, max: u64, version: u8 },
    /// The clock is outside the range the layout's time field can represent
    #[error("Timestamp overflow for version {version}. Time field holds at most {max} ticks")]
    TimestampOverflow { version: u8, max: u64 },
    /// The clock did not catch up within the configured bound
    #[error("Clock did not advance past tick {last_timestamp} within {waited:?}")]
    ClockWaitTimeout { last_timestamp: u64, waited: Duration },
}

impl SnowflakeError {
    /// Whether calling again may succeed without any configuration change
    pub fn is_retryable(&self) -> bool {
        matches!(self, SnowflakeError::ClockWaitTimeout { .. })
    }
}
