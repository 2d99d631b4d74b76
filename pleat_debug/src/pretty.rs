// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to microseconds using a [`Timebase`].

use std::io::Write;

use pleat_core::animation::{AnimationEventKind, AnimationPhase};
use pleat_core::time::{HostTime, Timebase};
use pleat_core::trace::{
    AnimationTraceEvent, FrameEvent, FrameSummary, PanelEvent, PhaseBeginEvent, PhaseEndEvent,
    PhaseKind, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ticks_to_us(&self, ticks: u64) -> f64 {
        self.timebase.ticks_to_nanos(ticks) as f64 / 1000.0
    }

    fn host_us(&self, t: HostTime) -> f64 {
        self.ticks_to_us(t.ticks())
    }
}

fn phase_name(phase: PhaseKind) -> &'static str {
    match phase {
        PhaseKind::Tick => "tick",
        PhaseKind::Compose => "compose",
        PhaseKind::Present => "present",
    }
}

fn animation_phase_name(phase: AnimationPhase) -> &'static str {
    match phase {
        AnimationPhase::Idle => "idle",
        AnimationPhase::Animating => "animating",
        AnimationPhase::Unmounted => "unmounted",
    }
}

fn animation_kind_name(kind: AnimationEventKind) -> &'static str {
    match kind {
        AnimationEventKind::Started => "started",
        AnimationEventKind::Superseded => "superseded",
        AnimationEventKind::Settled => "settled",
        AnimationEventKind::Cancelled => "cancelled",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:begin] frame={} {} at {:.1}µs",
            e.frame_index,
            phase_name(e.phase),
            self.host_us(e.timestamp),
        );
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:end] frame={} {} at {:.1}µs",
            e.frame_index,
            phase_name(e.phase),
            self.host_us(e.timestamp),
        );
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        let _ = writeln!(
            self.writer,
            "[frame] frame={} now={:.1}µs unfold={:.3} target={:.3} {} panels={} extent={:.1}",
            e.frame_index,
            self.host_us(e.now),
            e.unfold,
            e.target_unfold,
            animation_phase_name(e.phase),
            e.mounted_panels,
            e.content_extent,
        );
    }

    fn on_animation(&mut self, e: &AnimationTraceEvent) {
        let _ = writeln!(
            self.writer,
            "[anim] {} {:.3}->{:.3} at {:.1}µs",
            animation_kind_name(e.event.kind),
            e.event.from,
            e.event.to,
            self.host_us(e.at),
        );
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] frame={} unfold={:.3} panels={} tick={:.1}µs compose={:.1}µs \
             present={:.1}µs",
            s.frame_index,
            s.unfold,
            s.mounted_panels,
            self.ticks_to_us(s.tick_ticks),
            self.ticks_to_us(s.compose_ticks),
            self.ticks_to_us(s.present_ticks),
        );
    }

    fn on_panel(&mut self, e: &PanelEvent) {
        let direction = if e.folds_inward { "in" } else { "out" };
        let input = if e.interactive { "live" } else { "inert" };
        let _ = writeln!(
            self.writer,
            "[panel] frame={} #{} {direction} angle={:.3} extent={:.1} {input} layers={}",
            e.frame_index, e.index, e.angle, e.extent, e.layer_count,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pleat_core::animation::AnimationEvent;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_frame() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_frame(&FrameEvent {
            frame_index: 1,
            now: HostTime(1_000_000),
            unfold: 0.5,
            target_unfold: 1.0,
            phase: AnimationPhase::Animating,
            mounted_panels: 3,
            content_extent: 150.0,
        });
        let output = output(sink);
        assert!(output.starts_with("[frame]"), "got: {output}");
        assert!(output.contains("frame=1"), "got: {output}");
        assert!(output.contains("now=1000.0µs"), "got: {output}");
        assert!(output.contains("unfold=0.500"), "got: {output}");
        assert!(output.contains("animating"), "got: {output}");
    }

    #[test]
    fn pretty_print_animation_and_phases() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_animation(&AnimationTraceEvent {
            at: HostTime(2_000),
            event: AnimationEvent {
                kind: AnimationEventKind::Superseded,
                from: 0.25,
                to: 0.0,
            },
        });
        sink.on_phase_begin(&PhaseBeginEvent {
            frame_index: 4,
            phase: PhaseKind::Compose,
            timestamp: HostTime(3_000),
        });
        let output = output(sink);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[anim] superseded 0.250->0.000 at 2.0µs");
        assert_eq!(lines[1], "[phase:begin] frame=4 compose at 3.0µs");
    }

    #[test]
    fn pretty_print_panel() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_panel(&PanelEvent {
            frame_index: 2,
            index: 1,
            angle: -1.0,
            extent: 54.0,
            folds_inward: false,
            interactive: false,
            layer_count: 2,
        });
        let output = output(sink);
        assert!(output.contains("#1 out"), "got: {output}");
        assert!(output.contains("inert layers=2"), "got: {output}");
    }
}
