//! Per-generator `(last_timestamp, sequence)` state machine
//!
//! Pure: given the last emitted pair and a fresh clock tick, decide whether
//! to emit or wait. The caller owns locking and clock reads.

/// Last emitted timestamp and sequence
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct State {
    last_timestamp: u64,
    sequence: u64,
}

/// What the generator must do with a clock reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Emit an ID with these fields
    Emit { timestamp: u64, sequence: u64 },
    /// The clock is behind the last emitted tick; wait until it catches up
    Rollback { last_timestamp: u64 },
    /// Every sequence of the last tick is used; wait for a later tick
    Exhausted { last_timestamp: u64 },
}

impl State {
    #[inline(always)]
    pub(crate) const fn new() -> Self {
        Self {
            last_timestamp: 0,
            sequence: 0,
        }
    }

    #[cfg(test)]
    pub(crate) const fn last_timestamp(&self) -> u64 {
        self.last_timestamp
    }

    #[cfg(test)]
    pub(crate) const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Decide the next step for `tick`. `max_sequence` must be `2^bits - 1`.
    #[inline]
    pub(crate) fn plan(&self, tick: u64, max_sequence: u64) -> Step {
        if tick < self.last_timestamp {
            return Step::Rollback {
                last_timestamp: self.last_timestamp,
            };
        }

        if tick > self.last_timestamp {
            return Step::Emit {
                timestamp: tick,
                sequence: 0,
            };
        }

        let sequence = self.sequence.wrapping_add(1) & max_sequence;
        if sequence == 0 {
            Step::Exhausted {
                last_timestamp: self.last_timestamp,
            }
        } else {
            Step::Emit {
                timestamp: tick,
                sequence,
            }
        }
    }

    /// Record an emitted pair
    #[inline(always)]
    pub(crate) fn commit(&mut self, timestamp: u64, sequence: u64) {
        debug_assert!(timestamp >= self.last_timestamp);
        self.last_timestamp = timestamp;
        self.sequence = sequence;
    }
}
