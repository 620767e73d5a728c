//! Core Snowflake generator implementation
//!
//! Split into modules for testability:
//! - `state` - `(last_timestamp, sequence)` state machine
//! - `time` - Clock trait and the system clock
//! - `wait` - Spin and poll strategy for clock waits
//! - `generate` - ID generation logic

mod generate;
mod state;
mod time;
mod wait;

use std::time::Instant;

use parking_lot::Mutex;

use crate::config::SnowflakeConfig;
use crate::error::SnowflakeError;
use crate::layout::{lookup, VersionLayout};

use state::State;
pub use time::{Clock, SystemClock};
use wait::{wait_until, WaitPolicy};

/// Per-node ID generator with cache-line alignment
///
/// One instance per node process. Safe to share across threads; all
/// callers serialize on one lock.
#[derive(Debug)]
#[repr(align(64))]
pub struct Snowflake<C = SystemClock> {
    // === Hot path fields ===
    state: Mutex<State>,
    prefix: u64,
    time_shift: u8,
    max_sequence: u64,
    layout: &'static VersionLayout,
    clock: C,

    // === Cold path fields ===
    node_id: u64,
    wait: WaitPolicy,
    config: SnowflakeConfig,
}

impl Snowflake {
    /// Create a generator reading the system clock
    pub fn new(config: SnowflakeConfig) -> Result<Self, SnowflakeError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Snowflake<C> {
    /// Create a generator reading `clock`
    ///
    /// Fails with `UnsupportedVersion` when the version is not registered
    /// and `InvalidNodeId` when the node ID does not fit the layout. The
    /// clock is not read here.
    pub fn with_clock(config: SnowflakeConfig, clock: C) -> Result<Self, SnowflakeError> {
        let layout = lookup(config.version())?;
        Self::validate_node_id(config.node_id(), layout)?;
        Ok(Self::build(config, layout, clock))
    }

    fn validate_node_id(node_id: u64, layout: &VersionLayout) -> Result<(), SnowflakeError> {
        let max = layout.max_node_id();
        if node_id > max {
            return Err(SnowflakeError::InvalidNodeId {
                node_id,
                max,
                version: layout.version(),
            });
        }
        Ok(())
    }

    fn build(config: SnowflakeConfig, layout: &'static VersionLayout, clock: C) -> Self {
        let shifts = layout.shifts();
        let node_id = config.node_id();
        Self {
            state: Mutex::new(State::new()),
            prefix: (u64::from(layout.version()) << shifts.version) | (node_id << shifts.node),
            time_shift: shifts.time,
            max_sequence: layout.max_sequence(),
            layout,
            clock,
            node_id,
            wait: WaitPolicy::from_config(&config),
            config,
        }
    }

    #[inline(always)]
    pub fn node_id(&self) -> u64 {
        self.node_id
    }

    #[inline(always)]
    pub fn version(&self) -> u8 {
        self.layout.version()
    }

    #[inline(always)]
    pub fn layout(&self) -> &'static VersionLayout {
        self.layout
    }

    #[inline(always)]
    pub fn config(&self) -> &SnowflakeConfig {
        &self.config
    }

    #[inline(always)]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current tick, or `TimestampOverflow` once the layout's range is used up
    #[inline]
    pub(crate) fn current_tick(&self) -> Result<u64, SnowflakeError> {
        let max = self.layout.max_timestamp();
        match self.layout.tick_at(self.clock.now()) {
            Some(tick) if tick <= max => Ok(tick),
            _ => Err(SnowflakeError::TimestampOverflow {
                version: self.layout.version(),
                max,
            }),
        }
    }

    /// Block until the clock reaches a tick accepted by `reached`, counting
    /// against the wait budget that began at `started`
    pub(crate) fn wait_for_tick<P>(
        &self,
        started: Instant,
        last_timestamp: u64,
        reached: P,
    ) -> Result<u64, SnowflakeError>
    where
        P: Fn(u64) -> bool,
    {
        wait_until(&self.wait, started, last_timestamp, || self.current_tick(), reached)
    }

    #[inline(always)]
    pub(crate) fn assemble_id(&self, timestamp: u64, sequence: u64) -> u64 {
        self.prefix | (timestamp << self.time_shift) | sequence
    }

    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> (u64, u64) {
        let state = self.state.lock();
        (state.last_timestamp(), state.sequence())
    }
}
