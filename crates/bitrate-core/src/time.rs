//! Exact integer time arithmetic.
//!
//! Timestamps and durations are signed tick counts under a timescale shared by
//! every sample in a sequence. Nothing here converts between timescales; the
//! only floating point conversion is [`TimeValue::as_secs_f64`], used for
//! display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::ops::{Add, AddAssign};

/// A signed tick count.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TimeValue(i64);

impl TimeValue {
    /// Zero ticks.
    pub const ZERO: Self = Self(0);

    /// The largest representable value. Used as an unbounded threshold.
    pub const MAX: Self = Self(i64::MAX);

    pub const fn new(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Raw tick count.
    pub const fn ticks(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Convert whole milliseconds into ticks of `timescale`, rounding toward zero.
    pub fn from_millis(millis: u64, timescale: Timescale) -> Self {
        let ticks = i128::from(millis) * i128::from(timescale.get()) / 1000;
        Self(i64::try_from(ticks).unwrap_or(i64::MAX))
    }

    /// Seconds represented by this value under `timescale`.
    pub fn as_secs_f64(self, timescale: Timescale) -> f64 {
        self.0 as f64 / f64::from(timescale.get())
    }
}

/// Saturates at the `i64` bounds.
impl Add for TimeValue {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for TimeValue {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl From<i64> for TimeValue {
    fn from(ticks: i64) -> Self {
        Self(ticks)
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticks per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timescale(NonZeroU32);

impl Timescale {
    /// Millisecond ticks.
    pub const MILLIS: Self = Self(NonZeroU32::MIN.saturating_add(999));

    /// Returns `None` for a zero timescale.
    pub fn new(ticks_per_second: u32) -> Option<Self> {
        NonZeroU32::new(ticks_per_second).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for Timescale {
    fn default() -> Self {
        Self::MILLIS
    }
}

impl fmt::Display for Timescale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
