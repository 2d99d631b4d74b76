// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame ticks delivered by the host clock.
//!
//! The host owns the frame clock (display link, `requestAnimationFrame`, a
//! test loop). Each time it wants a new frame it hands the strip a
//! [`FrameTick`]; the strip advances its animation to [`FrameTick::now`] and
//! every panel of that frame is computed from the resulting unfold value.

use crate::time::{Duration, HostTime};

/// A frame opportunity delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time the frame represents.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}

impl FrameTick {
    /// Creates a tick for frame `frame_index` at `now`.
    #[inline]
    #[must_use]
    pub const fn new(now: HostTime, frame_index: u64) -> Self {
        Self { now, frame_index }
    }

    /// Returns the tick that follows this one after `interval`.
    #[inline]
    #[must_use]
    pub fn next(self, interval: Duration) -> Self {
        Self {
            now: self.now + interval,
            frame_index: self.frame_index + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_advances_time_and_counter() {
        let tick = FrameTick::new(HostTime(1_000), 4);
        let next = tick.next(Duration(16_000_000));
        assert_eq!(next.now, HostTime(16_001_000));
        assert_eq!(next.frame_index, 5);
    }
}
