// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unfold animation: easing curves, tweens, and the animator state machine.
//!
//! [`FoldAnimator`] is the sole owner of the unfold value. It moves between
//! three phases:
//!
//! ```text
//!            set_target (≠ target)           tick reaches end
//!   Idle ──────────────────────────► Animating ───────────────► Idle
//!    │                               │    ▲
//!    │                               └────┘ set_target: cancel, restart
//!    │                                       from the *current* value
//!    └──────────── unmount (any phase) ────────────► Unmounted
//! ```
//!
//! Cancellation is synchronous: once a tween is superseded or the animator is
//! unmounted, no later value from it is ever observed. Cancelling is not an
//! error and is only reported as an [`AnimationEvent`] for tracing.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::fold::clamp_unfold;
use crate::time::{Duration, HostTime, Timebase};

/// An easing curve mapping linear progress in `[0, 1]` to eased progress.
///
/// Curves other than [`BackOut`](Self::BackOut) and overshooting
/// [`Cubic`](Self::Cubic) curves are monotonically non-decreasing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Cubic acceleration from rest.
    EaseIn,
    /// Cubic deceleration to rest.
    EaseOut,
    /// Cubic S-curve.
    #[default]
    EaseInOut,
    /// Deceleration with a slight overshoot past the end before settling.
    BackOut,
    /// CSS-style cubic Bézier through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
    ///
    /// `x1` and `x2` are expected in `[0, 1]`; they are clamped when sampled.
    Cubic(f64, f64, f64, f64),
}

impl Easing {
    /// Applies the curve to `t` (clamped to `[0, 1]`).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = clamp_unfold(t);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Self::BackOut => {
                const C1: f64 = 1.70158;
                const C3: f64 = C1 + 1.0;
                let u = t - 1.0;
                1.0 + C3 * u * u * u + C1 * u * u
            }
            Self::Cubic(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// Returns whether this curve can leave `[0, 1]`.
    #[must_use]
    pub fn can_overshoot(self) -> bool {
        match self {
            Self::BackOut => true,
            Self::Cubic(_, y1, _, y2) => !(0.0..=1.0).contains(&y1) || !(0.0..=1.0).contains(&y2),
            _ => false,
        }
    }
}

/// Samples a unit cubic Bézier at horizontal position `x`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);
    let sample = |a: f64, b: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    // x(s) is monotone for x1, x2 in [0, 1], so bisection always converges.
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    let mut s = x;
    for _ in 0..48 {
        let guess = sample(x1, x2, s);
        if (guess - x).abs() < 1e-9 {
            break;
        }
        if guess < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    sample(y1, y2, s)
}

/// Timing of a transition to a new unfold target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    /// How long the transition takes, in host ticks.
    pub duration: Duration,
    /// Easing applied to linear progress.
    pub easing: Easing,
}

impl AnimationSpec {
    /// 250 ms with [`Easing::EaseInOut`], in nanosecond ticks.
    pub const DEFAULT: Self = Self {
        duration: Duration::from_millis(250, Timebase::NANOS),
        easing: Easing::EaseInOut,
    };

    /// A spec that jumps straight to the target.
    pub const INSTANT: Self = Self {
        duration: Duration::ZERO,
        easing: Easing::Linear,
    };
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A single interpolation from one unfold value to another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Value at `start`.
    pub from: f64,
    /// Value once `duration` has elapsed.
    pub to: f64,
    /// Host time the tween began.
    pub start: HostTime,
    /// Total length.
    pub duration: Duration,
    /// Easing applied to linear progress.
    pub easing: Easing,
}

impl Tween {
    /// Returns linear progress at `now`, in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn progress(&self, now: HostTime) -> f64 {
        now.saturating_duration_since(self.start)
            .fraction_of(self.duration)
    }

    /// Returns the (unclamped) interpolated value at `now`.
    #[must_use]
    pub fn value_at(&self, now: HostTime) -> f64 {
        let eased = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * eased
    }

    /// Returns whether the tween has run its full duration at `now`.
    #[inline]
    #[must_use]
    pub fn is_finished(&self, now: HostTime) -> bool {
        self.progress(now) >= 1.0
    }
}

/// The animator's lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    /// Mounted and resting at its target.
    Idle,
    /// Mounted and interpolating toward its target.
    Animating,
    /// Torn down; ignores all further input.
    Unmounted,
}

/// What happened to the animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationEventKind {
    /// A tween began from an idle state.
    Started,
    /// An in-flight tween was cancelled and replaced by a new one.
    Superseded,
    /// The value reached its target.
    Settled,
    /// An in-flight tween was cancelled without replacement.
    Cancelled,
}

/// An animator state transition, reported for tracing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationEvent {
    /// Which transition occurred.
    pub kind: AnimationEventKind,
    /// Unfold value when the transition occurred (tween start for
    /// [`Settled`](AnimationEventKind::Settled)).
    pub from: f64,
    /// Target the animation was heading to.
    pub to: f64,
}

/// Owns the unfold value and drives it toward a target over time.
#[derive(Clone, Debug)]
pub struct FoldAnimator {
    value: f64,
    target: f64,
    spec: AnimationSpec,
    tween: Option<Tween>,
    mounted: bool,
}

impl FoldAnimator {
    /// Creates a mounted, idle animator resting at `initial` (clamped).
    ///
    /// The first mount never animates.
    #[must_use]
    pub fn new(initial: f64, spec: AnimationSpec) -> Self {
        let initial = clamp_unfold(initial);
        Self {
            value: initial,
            target: initial,
            spec,
            tween: None,
            mounted: true,
        }
    }

    /// Returns the current unfold value, always in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Returns the transition timing used for the next target change.
    #[inline]
    #[must_use]
    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    /// Returns the in-flight tween, if any.
    #[inline]
    #[must_use]
    pub fn tween(&self) -> Option<&Tween> {
        self.tween.as_ref()
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> AnimationPhase {
        if !self.mounted {
            AnimationPhase::Unmounted
        } else if self.tween.is_some() {
            AnimationPhase::Animating
        } else {
            AnimationPhase::Idle
        }
    }

    /// Replaces the timing used by future transitions.
    ///
    /// An in-flight tween keeps the timing it started with.
    pub fn set_spec(&mut self, spec: AnimationSpec) {
        self.spec = spec;
    }

    /// Retargets the animation at host time `now`.
    ///
    /// Setting the current target again is a no-op. Otherwise any in-flight
    /// tween is cancelled first and the new one starts from the value it had
    /// reached at `now`. Ignored once unmounted.
    pub fn set_target(&mut self, target: f64, now: HostTime) -> Option<AnimationEvent> {
        if !self.mounted {
            return None;
        }
        let target = clamp_unfold(target);
        if target == self.target {
            return None;
        }

        let abandoned = self.target;
        let superseded = match self.tween.take() {
            Some(tween) => {
                self.value = clamp_unfold(tween.value_at(now));
                true
            }
            None => false,
        };
        self.target = target;

        if target == self.value {
            return superseded.then_some(AnimationEvent {
                kind: AnimationEventKind::Cancelled,
                from: self.value,
                to: abandoned,
            });
        }

        let from = self.value;
        if self.spec.duration == Duration::ZERO {
            self.value = target;
            return Some(AnimationEvent {
                kind: AnimationEventKind::Settled,
                from,
                to: target,
            });
        }

        self.tween = Some(Tween {
            from,
            to: target,
            start: now,
            duration: self.spec.duration,
            easing: self.spec.easing,
        });
        Some(AnimationEvent {
            kind: if superseded {
                AnimationEventKind::Superseded
            } else {
                AnimationEventKind::Started
            },
            from,
            to: target,
        })
    }

    /// Advances the animation to host time `now`.
    ///
    /// Returns a [`Settled`](AnimationEventKind::Settled) event on the tick
    /// that reaches the target.
    pub fn tick(&mut self, now: HostTime) -> Option<AnimationEvent> {
        if !self.mounted {
            return None;
        }
        let tween = self.tween?;
        if tween.is_finished(now) {
            self.tween = None;
            self.value = self.target;
            return Some(AnimationEvent {
                kind: AnimationEventKind::Settled,
                from: tween.from,
                to: self.target,
            });
        }
        self.value = clamp_unfold(tween.value_at(now));
        None
    }

    /// Tears the animator down, silently cancelling any in-flight tween.
    pub fn unmount(&mut self) -> Option<AnimationEvent> {
        if !self.mounted {
            return None;
        }
        self.mounted = false;
        self.tween.take().map(|_| AnimationEvent {
            kind: AnimationEventKind::Cancelled,
            from: self.value,
            to: self.target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = 1_000_000;

    fn spec(ms: u64, easing: Easing) -> AnimationSpec {
        AnimationSpec {
            duration: Duration(ms * MS),
            easing,
        }
    }

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::BackOut,
            Easing::Cubic(0.25, 0.1, 0.25, 1.0),
        ] {
            assert!(easing.apply(0.0).abs() < 1e-9, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing:?} at 1");
        }
    }

    #[test]
    fn back_out_overshoots() {
        assert!(Easing::BackOut.can_overshoot());
        let peak = (1..100)
            .map(|i| Easing::BackOut.apply(f64::from(i) / 100.0))
            .fold(0.0_f64, f64::max);
        assert!(peak > 1.0, "peak = {peak}");
        assert!(!Easing::EaseInOut.can_overshoot());
        assert!(Easing::Cubic(0.3, -0.5, 0.7, 1.5).can_overshoot());
    }

    #[test]
    fn cubic_linear_control_points_are_identity() {
        let linear = Easing::Cubic(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            assert!((linear.apply(t) - t).abs() < 1e-6, "t = {t}");
        }
    }

    #[test]
    fn new_animator_is_idle_at_initial_value() {
        let anim = FoldAnimator::new(0.3, AnimationSpec::DEFAULT);
        assert_eq!(anim.phase(), AnimationPhase::Idle);
        assert_eq!(anim.value(), 0.3);
        assert_eq!(anim.target(), 0.3);
    }

    #[test]
    fn same_target_does_not_start_animation() {
        let mut anim = FoldAnimator::new(1.0, AnimationSpec::DEFAULT);
        assert_eq!(anim.set_target(1.0, HostTime(0)), None);
        assert_eq!(anim.phase(), AnimationPhase::Idle);
    }

    #[test]
    fn animates_to_target_and_settles() {
        let mut anim = FoldAnimator::new(0.0, spec(100, Easing::Linear));
        let started = anim.set_target(1.0, HostTime(0)).unwrap();
        assert_eq!(started.kind, AnimationEventKind::Started);
        assert_eq!(anim.phase(), AnimationPhase::Animating);

        assert_eq!(anim.tick(HostTime(50 * MS)), None);
        assert!((anim.value() - 0.5).abs() < 1e-9);

        let settled = anim.tick(HostTime(100 * MS)).unwrap();
        assert_eq!(settled.kind, AnimationEventKind::Settled);
        assert_eq!(anim.value(), 1.0);
        assert_eq!(anim.phase(), AnimationPhase::Idle);
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut anim = FoldAnimator::new(0.0, spec(100, Easing::Linear));
        anim.set_target(1.0, HostTime(0));
        anim.tick(HostTime(40 * MS));

        let event = anim.set_target(0.0, HostTime(60 * MS)).unwrap();
        assert_eq!(event.kind, AnimationEventKind::Superseded);
        // Sampled at the retarget time, not at the last tick or the old target.
        assert!((event.from - 0.6).abs() < 1e-9, "from = {}", event.from);
        let tween = anim.tween().unwrap();
        assert!((tween.from - 0.6).abs() < 1e-9);
        assert_eq!(tween.to, 0.0);
        assert_eq!(tween.start, HostTime(60 * MS));
    }

    #[test]
    fn retarget_to_current_value_cancels_without_restart() {
        let mut anim = FoldAnimator::new(0.0, spec(100, Easing::Linear));
        anim.set_target(1.0, HostTime(0));
        let event = anim.set_target(0.5, HostTime(50 * MS)).unwrap();
        assert_eq!(event.kind, AnimationEventKind::Cancelled);
        assert_eq!(anim.phase(), AnimationPhase::Idle);
        assert_eq!(anim.value(), 0.5);
    }

    #[test]
    fn zero_duration_jumps() {
        let mut anim = FoldAnimator::new(1.0, AnimationSpec::INSTANT);
        let event = anim.set_target(0.0, HostTime(10)).unwrap();
        assert_eq!(event.kind, AnimationEventKind::Settled);
        assert_eq!(anim.value(), 0.0);
        assert_eq!(anim.phase(), AnimationPhase::Idle);
    }

    #[test]
    fn overshooting_curve_stays_clamped() {
        let mut anim = FoldAnimator::new(0.0, spec(100, Easing::BackOut));
        anim.set_target(1.0, HostTime(0));
        for ms in 0..100 {
            anim.tick(HostTime(ms * MS));
            assert!((0.0..=1.0).contains(&anim.value()), "ms = {ms}");
        }
    }

    #[test]
    fn unmount_cancels_silently_and_freezes() {
        let mut anim = FoldAnimator::new(0.0, spec(100, Easing::Linear));
        anim.set_target(1.0, HostTime(0));
        anim.tick(HostTime(30 * MS));
        let value = anim.value();

        let event = anim.unmount().unwrap();
        assert_eq!(event.kind, AnimationEventKind::Cancelled);
        assert_eq!(anim.phase(), AnimationPhase::Unmounted);

        assert_eq!(anim.tick(HostTime(90 * MS)), None);
        assert_eq!(anim.set_target(0.0, HostTime(95 * MS)), None);
        assert_eq!(anim.value(), value);
        assert_eq!(anim.unmount(), None);
    }

    #[test]
    fn target_is_clamped() {
        let mut anim = FoldAnimator::new(2.0, AnimationSpec::INSTANT);
        assert_eq!(anim.value(), 1.0);
        anim.set_target(-1.0, HostTime(0));
        assert_eq!(anim.value(), 0.0);
    }
}
