//! Configuration for the Snowflake generator

mod builder;

use std::time::Duration;

use thiserror::Error;

pub use builder::SnowflakeConfigBuilder;
use builder::{
    DEFAULT_NODE_ID, DEFAULT_POLL_INTERVAL, DEFAULT_SPIN_LOOPS, DEFAULT_SPIN_YIELD_EVERY,
    DEFAULT_VERSION,
};

/// Errors related to `SnowflakeConfig` builder validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnowflakeConfigError {
    /// A zero poll interval would turn every clock wait into a hot loop
    #[error("Poll interval must be greater than zero")]
    ZeroPollInterval,
}

/// Configuration for a Snowflake generator
///
/// Version and node ID are checked against the layout registry when the
/// generator is created, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnowflakeConfig {
    version: u8,
    node_id: u64,
    poll_interval: Duration,
    spin_loops: u32,
    spin_yield_every: u32,
    max_clock_wait: Option<Duration>,
}

impl SnowflakeConfig {
    /// Configuration for `node_id` under `version`, with default wait settings
    pub fn new(version: u8, node_id: u64) -> Self {
        Self {
            version,
            node_id,
            poll_interval: DEFAULT_POLL_INTERVAL,
            spin_loops: DEFAULT_SPIN_LOOPS,
            spin_yield_every: DEFAULT_SPIN_YIELD_EVERY,
            max_clock_wait: None,
        }
    }

    /// Create config from builder
    pub(crate) fn from_builder(b: SnowflakeConfigBuilder) -> Self {
        Self {
            version: b.version,
            node_id: b.node_id,
            poll_interval: b.poll_interval,
            spin_loops: b.spin_loops,
            spin_yield_every: b.spin_yield_every,
            max_clock_wait: b.max_clock_wait,
        }
    }

    /// Create a new configuration builder
    pub fn builder() -> SnowflakeConfigBuilder {
        SnowflakeConfigBuilder::new()
    }

    #[inline(always)]
    pub const fn version(&self) -> u8 {
        self.version
    }

    #[inline(always)]
    pub const fn node_id(&self) -> u64 {
        self.node_id
    }

    /// Sleep between clock reads while waiting for the clock to catch up
    #[inline(always)]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    #[inline(always)]
    pub const fn spin_loops(&self) -> u32 {
        self.spin_loops
    }

    #[inline(always)]
    pub const fn spin_yield_every(&self) -> u32 {
        self.spin_yield_every
    }

    /// Upper bound on a single clock wait. `None` waits indefinitely.
    #[inline(always)]
    pub const fn max_clock_wait(&self) -> Option<Duration> {
        self.max_clock_wait
    }
}

impl Default for SnowflakeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION, DEFAULT_NODE_ID)
    }
}
