//! Waiting for the clock to reach a target tick
//!
//! Used for both clock rollback and sequence exhaustion. The caller holds
//! the generator lock for the whole wait, so every other caller queues
//! behind it. A short spin phase is followed by fixed-interval sleeps; the
//! clock is re-read on every iteration.

use std::thread;
use std::time::{Duration, Instant};

use crate::config::SnowflakeConfig;
use crate::error::SnowflakeError;

/// Wait settings copied out of the config at construction
#[derive(Debug, Clone, Copy)]
pub(crate) struct WaitPolicy {
    pub(crate) poll_interval: Duration,
    pub(crate) spin_loops: u32,
    pub(crate) spin_yield_every: u32,
    pub(crate) max_wait: Option<Duration>,
}

impl WaitPolicy {
    pub(crate) fn from_config(config: &SnowflakeConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            spin_loops: config.spin_loops(),
            spin_yield_every: config.spin_yield_every(),
            max_wait: config.max_clock_wait(),
        }
    }
}

/// Spin through `policy.spin_loops` reads, returning the first tick that satisfies `reached`
#[inline]
pub(crate) fn spin_wait<F, P>(
    policy: &WaitPolicy,
    read_tick: &mut F,
    reached: &P,
) -> Result<Option<u64>, SnowflakeError>
where
    F: FnMut() -> Result<u64, SnowflakeError>,
    P: Fn(u64) -> bool,
{
    let yield_every = policy.spin_yield_every;

    for i in 0..policy.spin_loops {
        let tick = read_tick()?;
        if reached(tick) {
            return Ok(Some(tick));
        }

        std::hint::spin_loop();

        if yield_every != 0 && i % yield_every == yield_every - 1 {
            thread::yield_now();
        }
    }

    Ok(None)
}

/// Block until `read_tick` yields a tick satisfying `reached`.
///
/// `started` is when the calling `next_id` began waiting; the deadline and
/// the reported wait are measured from it, so consecutive waits in one call
/// share a single budget. `last_timestamp` is only used to describe a
/// timeout. Errors from `read_tick` (timestamp overflow) end the wait
/// immediately.
pub(crate) fn wait_until<F, P>(
    policy: &WaitPolicy,
    started: Instant,
    last_timestamp: u64,
    mut read_tick: F,
    reached: P,
) -> Result<u64, SnowflakeError>
where
    F: FnMut() -> Result<u64, SnowflakeError>,
    P: Fn(u64) -> bool,
{
    if let Some(tick) = spin_wait(policy, &mut read_tick, &reached)? {
        return Ok(tick);
    }

    loop {
        if let Some(limit) = policy.max_wait {
            let waited = started.elapsed();
            if waited >= limit {
                return Err(SnowflakeError::ClockWaitTimeout {
                    last_timestamp,
                    waited,
                });
            }
        }

        thread::sleep(policy.poll_interval);

        let tick = read_tick()?;
        if reached(tick) {
            return Ok(tick);
        }
    }
}
