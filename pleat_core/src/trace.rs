// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the strip's frame loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! strip calls while it animates, composes, and presents. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! The strip never talks to a sink directly; it goes through a [`Tracer`],
//! which holds an optional `&mut dyn TraceSink`. Without the `trace` feature
//! the tracer is an empty marker and its methods are empty bodies.
//!
//! [`FrameSummaryBuilder`] collects phase timestamps during a frame and
//! produces a [`FrameSummary`] at the end.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) gates the per-panel [`PanelEvent`] and the
//!   corresponding `TraceSink` method.

use crate::animation::{AnimationEvent, AnimationPhase};
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which phase of a strip frame is being measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Advancing the animation to the frame time.
    Tick,
    /// Projecting, placing, and decorating panels.
    Compose,
    /// Handing the composed frame to the presenter.
    Present,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once per presented frame, after composition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEvent {
    /// Frame counter from the host tick.
    pub frame_index: u64,
    /// Host time of the frame.
    pub now: HostTime,
    /// Unfold value the frame was composed at.
    pub unfold: f64,
    /// Target the animator is heading to.
    pub target_unfold: f64,
    /// Animator phase after the tick.
    pub phase: AnimationPhase,
    /// Number of mounted panels.
    pub mounted_panels: usize,
    /// Sum of projected panel extents.
    pub content_extent: f64,
}

/// An animator transition together with the host time it happened at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationTraceEvent {
    /// Host time of the transition.
    pub at: HostTime,
    /// The transition.
    pub event: AnimationEvent,
}

/// Marks the beginning of a frame phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseBeginEvent {
    /// Index of the frame this belongs to.
    pub frame_index: u64,
    /// Which phase is starting.
    pub phase: PhaseKind,
    /// Host time at the start of the phase.
    pub timestamp: HostTime,
}

/// Marks the end of a frame phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseEndEvent {
    /// Index of the frame this belongs to.
    pub frame_index: u64,
    /// Which phase is ending.
    pub phase: PhaseKind,
    /// Host time at the end of the phase.
    pub timestamp: HostTime,
}

/// How long each phase of one presented frame took, in host ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSummary {
    /// Index of the frame this belongs to.
    pub frame_index: u64,
    /// Host time of the frame.
    pub now: HostTime,
    /// Unfold value the frame was composed at.
    pub unfold: f64,
    /// Number of mounted panels.
    pub mounted_panels: usize,
    /// Tick phase duration in ticks (0 if not measured).
    pub tick_ticks: u64,
    /// Compose phase duration in ticks (0 if not measured).
    pub compose_ticks: u64,
    /// Present phase duration in ticks (0 if not measured).
    pub present_ticks: u64,
}

/// Geometry of one mounted panel in one frame.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelEvent {
    /// Index of the frame this belongs to.
    pub frame_index: u64,
    /// Panel index.
    pub index: usize,
    /// Signed fold angle in radians.
    pub angle: f64,
    /// Projected extent along the axis.
    pub extent: f64,
    /// Whether the panel folds inward.
    pub folds_inward: bool,
    /// Whether the panel accepts input.
    pub interactive: bool,
    /// Number of paint layers attached by decoration.
    pub layer_count: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a fold strip.
///
/// Every method has an empty default body.
pub trait TraceSink {
    /// Called at the beginning of a frame phase.
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        _ = e;
    }

    /// Called at the end of a frame phase.
    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        _ = e;
    }

    /// Called after each frame is composed.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called when the animator starts, supersedes, settles, or cancels.
    fn on_animation(&mut self, e: &AnimationTraceEvent) {
        _ = e;
    }

    /// Called with a per-frame timing summary.
    fn on_frame_summary(&mut self, s: &FrameSummary) {
        _ = s;
    }

    /// Called once per mounted panel (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_panel(&mut self, e: &PanelEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A sink with no overrides.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// The strip's handle on an optional [`TraceSink`].
///
/// Pass [`Tracer::none`] when nobody is listening. Without the `trace`
/// feature the sink is dropped at construction and nothing is dispatched.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PhaseBeginEvent`].
    #[inline]
    pub fn phase_begin(&mut self, e: &PhaseBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseEndEvent`].
    #[inline]
    pub fn phase_end(&mut self, e: &PhaseEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AnimationTraceEvent`] for `event` at `at`.
    #[inline]
    pub fn animation(&mut self, at: HostTime, event: &AnimationEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_animation(&AnimationTraceEvent { at, event: *event });
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (at, event);
        }
    }

    /// Emits a [`FrameSummary`].
    #[inline]
    pub fn frame_summary(&mut self, s: &FrameSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_frame_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits a [`PanelEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn panel(&mut self, e: &PanelEvent) {
        if let Some(s) = &mut self.sink {
            s.on_panel(e);
        }
    }
}

// ---------------------------------------------------------------------------
// FrameSummaryBuilder
// ---------------------------------------------------------------------------

/// Accumulates one frame's phase boundaries into a [`FrameSummary`].
#[derive(Debug)]
pub struct FrameSummaryBuilder {
    frame_index: u64,
    now: HostTime,
    unfold: f64,
    mounted_panels: usize,
    phase_starts: [Option<HostTime>; 3],
    phase_ends: [Option<HostTime>; 3],
}

impl FrameSummaryBuilder {
    /// Starts building a summary for frame `frame_index` at `now`.
    #[must_use]
    pub fn new(frame_index: u64, now: HostTime) -> Self {
        Self {
            frame_index,
            now,
            unfold: 0.0,
            mounted_panels: 0,
            phase_starts: [None; 3],
            phase_ends: [None; 3],
        }
    }

    /// Records the start of a phase.
    pub fn phase_begin(&mut self, phase: PhaseKind, t: HostTime) {
        self.phase_starts[phase_index(phase)] = Some(t);
    }

    /// Records the end of a phase.
    pub fn phase_end(&mut self, phase: PhaseKind, t: HostTime) {
        self.phase_ends[phase_index(phase)] = Some(t);
    }

    /// Records what the frame composed.
    pub fn set_composed(&mut self, unfold: f64, mounted_panels: usize) {
        self.unfold = unfold;
        self.mounted_panels = mounted_panels;
    }

    /// Consumes the builder and produces the final [`FrameSummary`].
    #[must_use]
    pub fn finish(self) -> FrameSummary {
        FrameSummary {
            frame_index: self.frame_index,
            now: self.now,
            unfold: self.unfold,
            mounted_panels: self.mounted_panels,
            tick_ticks: self.phase_duration(PhaseKind::Tick),
            compose_ticks: self.phase_duration(PhaseKind::Compose),
            present_ticks: self.phase_duration(PhaseKind::Present),
        }
    }

    fn phase_duration(&self, phase: PhaseKind) -> u64 {
        let idx = phase_index(phase);
        match (self.phase_starts[idx], self.phase_ends[idx]) {
            (Some(start), Some(end)) => end.saturating_duration_since(start).ticks(),
            _ => 0,
        }
    }
}

/// Slot of `phase` in the builder arrays.
const fn phase_index(phase: PhaseKind) -> usize {
    match phase {
        PhaseKind::Tick => 0,
        PhaseKind::Compose => 1,
        PhaseKind::Present => 2,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationEventKind;

    fn sample_frame() -> FrameEvent {
        FrameEvent {
            frame_index: 42,
            now: HostTime(1_000_000),
            unfold: 0.5,
            target_unfold: 1.0,
            phase: AnimationPhase::Animating,
            mounted_panels: 3,
            content_extent: 150.0,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_frame(&sample_frame());
        sink.on_animation(&AnimationTraceEvent {
            at: HostTime(0),
            event: AnimationEvent {
                kind: AnimationEventKind::Started,
                from: 0.0,
                to: 1.0,
            },
        });
        sink.on_frame_summary(&FrameSummaryBuilder::new(0, HostTime(0)).finish());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.frame(&sample_frame());
        tracer.phase_begin(&PhaseBeginEvent {
            frame_index: 0,
            phase: PhaseKind::Tick,
            timestamp: HostTime(0),
        });
    }

    #[test]
    fn summary_builder_computes_durations() {
        let mut builder = FrameSummaryBuilder::new(42, HostTime(1_000_000));
        builder.phase_begin(PhaseKind::Tick, HostTime(1_000_000));
        builder.phase_end(PhaseKind::Tick, HostTime(1_000_100));
        builder.phase_begin(PhaseKind::Compose, HostTime(1_000_100));
        builder.phase_end(PhaseKind::Compose, HostTime(1_000_500));
        builder.phase_begin(PhaseKind::Present, HostTime(1_000_500));
        builder.phase_end(PhaseKind::Present, HostTime(1_002_000));
        builder.set_composed(0.25, 3);

        let summary = builder.finish();
        assert_eq!(summary.tick_ticks, 100);
        assert_eq!(summary.compose_ticks, 400);
        assert_eq!(summary.present_ticks, 1500);
        assert_eq!(summary.unfold, 0.25);
        assert_eq!(summary.mounted_panels, 3);
        assert_eq!(summary.frame_index, 42);
    }

    #[test]
    fn summary_builder_missing_phases_are_zero() {
        let summary = FrameSummaryBuilder::new(1, HostTime(5)).finish();
        assert_eq!(summary.tick_ticks, 0);
        assert_eq!(summary.compose_ticks, 0);
        assert_eq!(summary.present_ticks, 0);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            animations: Vec<AnimationEventKind>,
        }
        impl TraceSink for RecordingSink {
            fn on_animation(&mut self, e: &AnimationTraceEvent) {
                self.animations.push(e.event.kind);
            }
        }

        let mut sink = RecordingSink {
            animations: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.animation(
            HostTime(7),
            &AnimationEvent {
                kind: AnimationEventKind::Settled,
                from: 0.0,
                to: 1.0,
            },
        );
        drop(tracer);
        assert_eq!(sink.animations, [AnimationEventKind::Settled]);
    }
}
