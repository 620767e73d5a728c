//! Time sources for Snowflake generation
//!
//! The generator only needs "now" as a UTC instant; the tick arithmetic
//! lives on the layout.

use chrono::{DateTime, Utc};

/// A source of wall-clock readings
pub trait Clock {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// The operating system's real-time clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline(always)]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline(always)]
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    #[inline(always)]
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
