//! Bit layouts for every published ID version
//!
//! A layout fixes the field widths, tick length and epoch of one version.
//! Once an ID has been minted under a layout its parameters are part of
//! the wire format and must never change.

mod registry;

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

pub use registry::{lookup, LayoutRegistry};

/// Width of the version field, identical for every layout
pub const VERSION_BITS: u8 = 3;

/// Bit position of the version field, identical for every layout
pub const VERSION_SHIFT: u8 = 64 - VERSION_BITS;

/// `[version:3][time:45][node:8][sequence:8]`, 1ms ticks since 2026-01-01T00:00:00Z
pub const VERSION_0: u8 = 0;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Errors found while registering a layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("Layout {version} uses {total} bits, more than 64")]
    FieldWidthOverflow { version: u8, total: u32 },
    #[error("Version {version} does not fit in {bits} version bits")]
    VersionOutOfRange { version: u8, bits: u8 },
    #[error("Layout {version} puts the version field at bit {shift} instead of the top bits")]
    VersionNotAtTop { version: u8, shift: u8 },
    #[error("Layout {version} has a zero time unit")]
    ZeroTimeUnit { version: u8 },
    #[error("Layout {version} has a time range that cannot be represented as a UTC instant")]
    UnrepresentableRange { version: u8 },
    #[error("Version {version} is registered twice")]
    DuplicateVersion { version: u8 },
}

/// Bit offsets of each field, counted from the least significant bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shifts {
    pub version: u8,
    pub time: u8,
    pub node: u8,
    pub sequence: u8,
}

/// Immutable description of one ID version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionLayout {
    version: u8,
    version_bits: u8,
    time_bits: u8,
    node_bits: u8,
    sequence_bits: u8,
    time_unit: Duration,
    epoch: DateTime<Utc>,
    max_node_id: u64,
    max_sequence: u64,
    max_timestamp: u64,
}

/// Largest value that fits in `bits` bits
#[inline(always)]
pub(crate) const fn mask(bits: u8) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

impl VersionLayout {
    /// Describe a layout. Derived maxima are computed here and nowhere else.
    pub(crate) fn new(
        version: u8,
        time_bits: u8,
        node_bits: u8,
        sequence_bits: u8,
        time_unit: Duration,
        epoch: DateTime<Utc>,
    ) -> Self {
        Self {
            version,
            version_bits: VERSION_BITS,
            time_bits,
            node_bits,
            sequence_bits,
            time_unit,
            epoch,
            max_node_id: mask(node_bits),
            max_sequence: mask(sequence_bits),
            max_timestamp: mask(time_bits),
        }
    }

    /// Check the layout can be published
    pub fn validate(&self) -> Result<(), LayoutError> {
        let version = self.version;
        let total = u32::from(self.version_bits)
            + u32::from(self.time_bits)
            + u32::from(self.node_bits)
            + u32::from(self.sequence_bits);
        if total > 64 {
            return Err(LayoutError::FieldWidthOverflow { version, total });
        }
        if u64::from(version) > mask(self.version_bits) {
            return Err(LayoutError::VersionOutOfRange {
                version,
                bits: self.version_bits,
            });
        }
        // Decoders read the version before they know the layout.
        let shift = self.shifts().version;
        if self.version_bits != VERSION_BITS || shift != VERSION_SHIFT {
            return Err(LayoutError::VersionNotAtTop { version, shift });
        }
        if self.time_unit.is_zero() {
            return Err(LayoutError::ZeroTimeUnit { version });
        }
        if self.time_of(self.max_timestamp).is_none() {
            return Err(LayoutError::UnrepresentableRange { version });
        }
        Ok(())
    }

    #[inline(always)]
    pub const fn version(&self) -> u8 {
        self.version
    }

    #[inline(always)]
    pub const fn version_bits(&self) -> u8 {
        self.version_bits
    }

    #[inline(always)]
    pub const fn time_bits(&self) -> u8 {
        self.time_bits
    }

    #[inline(always)]
    pub const fn node_bits(&self) -> u8 {
        self.node_bits
    }

    #[inline(always)]
    pub const fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    /// Duration of one tick of the time field
    #[inline(always)]
    pub const fn time_unit(&self) -> Duration {
        self.time_unit
    }

    /// Instant of tick zero
    #[inline(always)]
    pub const fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    #[inline(always)]
    pub const fn max_node_id(&self) -> u64 {
        self.max_node_id
    }

    #[inline(always)]
    pub const fn max_sequence(&self) -> u64 {
        self.max_sequence
    }

    #[inline(always)]
    pub const fn max_timestamp(&self) -> u64 {
        self.max_timestamp
    }

    #[inline(always)]
    pub const fn shifts(&self) -> Shifts {
        let node = self.sequence_bits;
        let time = node + self.node_bits;
        Shifts {
            version: time + self.time_bits,
            time,
            node,
            sequence: 0,
        }
    }

    /// Pack fields into an ID. Each field is masked to its width.
    #[inline]
    pub fn compose(&self, timestamp: u64, node_id: u64, sequence: u64) -> u64 {
        let shifts = self.shifts();
        (u64::from(self.version) << shifts.version)
            | ((timestamp & self.max_timestamp) << shifts.time)
            | ((node_id & self.max_node_id) << shifts.node)
            | (sequence & self.max_sequence)
    }

    /// Split an ID into timestamp, node ID and sequence under this layout
    #[inline]
    pub fn decompose(&self, id: u64) -> (u64, u64, u64) {
        let shifts = self.shifts();
        let timestamp = (id >> shifts.time) & self.max_timestamp;
        let node_id = (id >> shifts.node) & self.max_node_id;
        let sequence = id & self.max_sequence;
        (timestamp, node_id, sequence)
    }

    /// Ticks elapsed since the epoch at `now`.
    ///
    /// `None` when `now` is before the epoch or too far out for a `u64`.
    /// The caller still has to compare the result with [`Self::max_timestamp`].
    pub(crate) fn tick_at(&self, now: DateTime<Utc>) -> Option<u64> {
        let elapsed = now.signed_duration_since(self.epoch).to_std().ok()?;
        u64::try_from(elapsed.as_nanos() / self.time_unit.as_nanos()).ok()
    }

    /// Absolute instant of `tick`: `epoch + tick * time_unit`
    pub fn time_of(&self, tick: u64) -> Option<DateTime<Utc>> {
        let nanos = u128::from(tick) * self.time_unit.as_nanos();
        let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
        let offset = Duration::new(secs, (nanos % NANOS_PER_SEC) as u32);
        let offset = TimeDelta::from_std(offset).ok()?;
        self.epoch.checked_add_signed(offset)
    }
}
