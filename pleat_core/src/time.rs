// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host clock ticks.
//!
//! Fold strips never read a clock themselves: every timestamp arrives from
//! the host as a [`HostTime`] in the clock's native units. Tween lengths are
//! [`Duration`]s in those same units, and a [`Timebase`] converts between
//! ticks and nanoseconds for hosts (and trace exporters) that need wall time.

use core::fmt;
use core::ops::{Add, Sub};

/// A monotonic timestamp in host clock ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// The raw tick count.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Ticks elapsed since `earlier`; zero if `earlier` is later than `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for HostTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Self) -> Duration {
        self.saturating_duration_since(rhs)
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({})", self.0)
    }
}

/// Ticks-to-nanoseconds ratio: `nanos = ticks * numer / denom`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timebase {
    /// Nanoseconds per `denom` ticks.
    pub numer: u32,
    /// Ticks per `numer` nanoseconds.
    pub denom: u32,
}

impl Timebase {
    /// One tick per nanosecond.
    pub const NANOS: Self = Self { numer: 1, denom: 1 };

    /// Creates a timebase from a non-zero ratio.
    ///
    /// # Panics
    ///
    /// Panics if either part of the ratio is zero.
    #[inline]
    #[must_use]
    pub const fn new(numer: u32, denom: u32) -> Self {
        assert!(numer != 0 && denom != 0, "timebase ratio must be non-zero");
        Self { numer, denom }
    }

    /// Converts ticks to nanoseconds, saturating at `u64::MAX`.
    #[inline]
    #[must_use]
    pub const fn ticks_to_nanos(self, ticks: u64) -> u64 {
        scale(ticks, self.numer, self.denom)
    }

    /// Converts nanoseconds to ticks, saturating at `u64::MAX`.
    #[inline]
    #[must_use]
    pub const fn nanos_to_ticks(self, nanos: u64) -> u64 {
        scale(nanos, self.denom, self.numer)
    }
}

impl fmt::Debug for Timebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timebase({}/{})", self.numer, self.denom)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "checked against u64::MAX before narrowing"
)]
const fn scale(value: u64, mul: u32, div: u32) -> u64 {
    let wide = value as u128 * mul as u128 / div as u128;
    if wide > u64::MAX as u128 {
        u64::MAX
    } else {
        wide as u64
    }
}

/// A span of host clock ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// No time at all. Animations with this length jump to their target.
    pub const ZERO: Self = Self(0);

    /// The raw tick count.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// A span of `millis` milliseconds in `timebase` ticks.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64, timebase: Timebase) -> Self {
        Self(timebase.nanos_to_ticks(millis.saturating_mul(1_000_000)))
    }

    /// How far `self` is through `total`, clamped to `[0, 1]`.
    ///
    /// Anything is all the way through a zero-length `total`.
    #[inline]
    #[must_use]
    pub fn fraction_of(self, total: Self) -> f64 {
        if total.0 == 0 {
            return 1.0;
        }
        (self.0 as f64 / total.0 as f64).clamp(0.0, 1.0)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({})", self.0)
    }
}
