//! SnowflakeConfig builder for constructing configuration

use std::time::Duration;

use super::{SnowflakeConfig, SnowflakeConfigError};
use crate::layout::VERSION_0;

/// Default configuration values
pub(super) const DEFAULT_VERSION: u8 = VERSION_0;
pub(super) const DEFAULT_NODE_ID: u64 = 0;
pub(super) const DEFAULT_POLL_INTERVAL: Duration = Duration::from_micros(100);
pub(super) const DEFAULT_SPIN_LOOPS: u32 = 64;
pub(super) const DEFAULT_SPIN_YIELD_EVERY: u32 = 16;

/// Builder for SnowflakeConfig
#[derive(Debug)]
pub struct SnowflakeConfigBuilder {
    pub(super) version: u8,
    pub(super) node_id: u64,
    pub(super) poll_interval: Duration,
    pub(super) spin_loops: u32,
    pub(super) spin_yield_every: u32,
    pub(super) max_clock_wait: Option<Duration>,
}

impl SnowflakeConfigBuilder {
    /// Create a new SnowflakeConfigBuilder with default values
    pub fn new() -> Self {
        Self {
            version: DEFAULT_VERSION,
            node_id: DEFAULT_NODE_ID,
            poll_interval: DEFAULT_POLL_INTERVAL,
            spin_loops: DEFAULT_SPIN_LOOPS,
            spin_yield_every: DEFAULT_SPIN_YIELD_EVERY,
            max_clock_wait: None,
        }
    }

    /// Set the layout version IDs are minted under
    pub const fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Set the node ID embedded in every ID
    pub const fn node_id(mut self, node_id: u64) -> Self {
        self.node_id = node_id;
        self
    }

    /// Set the sleep between clock reads during rollback or sequence exhaustion
    pub fn poll_interval(mut self, interval: Duration) -> Result<Self, SnowflakeConfigError> {
        if interval.is_zero() {
            return Err(SnowflakeConfigError::ZeroPollInterval);
        }
        self.poll_interval = interval;
        Ok(self)
    }

    /// Set number of spin loops attempted before falling back to sleep. 0 disables spinning
    pub const fn spin_loops(mut self, loops: u32) -> Self {
        self.spin_loops = loops;
        self
    }

    /// Set spin yield cadence. Yield every N spin iterations; 0 disables yielding
    pub const fn spin_yield_every(mut self, n: u32) -> Self {
        self.spin_yield_every = n;
        self
    }

    /// Bound how long one call may wait for the clock before failing with
    /// `ClockWaitTimeout`. `None` restores the unbounded wait.
    pub const fn max_clock_wait(mut self, limit: Option<Duration>) -> Self {
        self.max_clock_wait = limit;
        self
    }

    /// Build the final SnowflakeConfig
    pub fn build(self) -> SnowflakeConfig {
        SnowflakeConfig::from_builder(self)
    }
}

impl Default for SnowflakeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
