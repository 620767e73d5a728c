//! ID generation logic

use std::time::Instant;

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::state::Step;
use super::{Clock, Snowflake};
use crate::error::SnowflakeError;

impl<C: Clock> Snowflake<C> {
    /// Generate a new ID
    ///
    /// Blocks while the clock is behind the last emitted tick or the
    /// current tick's sequence space is used up, holding the generator lock
    /// throughout. With `max_clock_wait` set, such a wait fails with
    /// `ClockWaitTimeout` instead; a rollback wait followed by an exhaustion
    /// wait shares that one budget. A failed call leaves the generator state
    /// unchanged.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<u64, SnowflakeError> {
        let mut state = self.state.lock();
        let mut tick = self.current_tick()?;
        let mut started = None;

        loop {
            match state.plan(tick, self.max_sequence) {
                Step::Emit {
                    timestamp,
                    sequence,
                } => {
                    state.commit(timestamp, sequence);
                    return Ok(self.assemble_id(timestamp, sequence));
                }
                Step::Rollback { last_timestamp } => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(tick, last_timestamp, "clock moved backwards, waiting");
                    let since = *started.get_or_insert_with(Instant::now);
                    tick = self.wait_for_tick(since, last_timestamp, |t| t >= last_timestamp)?;
                }
                Step::Exhausted { last_timestamp } => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(last_timestamp, "sequence exhausted, waiting for next tick");
                    let since = *started.get_or_insert_with(Instant::now);
                    tick = self.wait_for_tick(since, last_timestamp, |t| t > last_timestamp)?;
                }
            }
        }
    }
}
