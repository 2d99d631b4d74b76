// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`]. Floating-point fields are stored as
//! their IEEE-754 bit patterns, so decoded values are exact.

use pleat_core::animation::{AnimationEvent, AnimationEventKind, AnimationPhase};
use pleat_core::time::HostTime;
use pleat_core::trace::{
    AnimationTraceEvent, FrameEvent, FrameSummary, PanelEvent, PhaseBeginEvent, PhaseEndEvent,
    PhaseKind, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PHASE_BEGIN: u8 = 1;
const TAG_PHASE_END: u8 = 2;
const TAG_FRAME: u8 = 3;
const TAG_ANIMATION: u8 = 4;
const TAG_FRAME_SUMMARY: u8 = 5;
const TAG_PANEL: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_usize(&mut self, v: usize) {
        self.write_u64(u64::try_from(v).unwrap_or(u64::MAX));
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_phase(&mut self, p: PhaseKind) {
        self.write_u8(match p {
            PhaseKind::Tick => 0,
            PhaseKind::Compose => 1,
            PhaseKind::Present => 2,
        });
    }

    fn write_animation_phase(&mut self, p: AnimationPhase) {
        self.write_u8(match p {
            AnimationPhase::Idle => 0,
            AnimationPhase::Animating => 1,
            AnimationPhase::Unmounted => 2,
        });
    }

    fn write_animation_kind(&mut self, k: AnimationEventKind) {
        self.write_u8(match k {
            AnimationEventKind::Started => 0,
            AnimationEventKind::Superseded => 1,
            AnimationEventKind::Settled => 2,
            AnimationEventKind::Cancelled => 3,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.write_u8(TAG_PHASE_BEGIN);
        self.write_u64(e.frame_index);
        self.write_phase(e.phase);
        self.write_u64(e.timestamp.ticks());
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.write_u8(TAG_PHASE_END);
        self.write_u64(e.frame_index);
        self.write_phase(e.phase);
        self.write_u64(e.timestamp.ticks());
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.write_u8(TAG_FRAME);
        self.write_u64(e.frame_index);
        self.write_u64(e.now.ticks());
        self.write_f64(e.unfold);
        self.write_f64(e.target_unfold);
        self.write_animation_phase(e.phase);
        self.write_usize(e.mounted_panels);
        self.write_f64(e.content_extent);
    }

    fn on_animation(&mut self, e: &AnimationTraceEvent) {
        self.write_u8(TAG_ANIMATION);
        self.write_u64(e.at.ticks());
        self.write_animation_kind(e.event.kind);
        self.write_f64(e.event.from);
        self.write_f64(e.event.to);
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.write_u8(TAG_FRAME_SUMMARY);
        self.write_u64(s.frame_index);
        self.write_u64(s.now.ticks());
        self.write_f64(s.unfold);
        self.write_usize(s.mounted_panels);
        self.write_u64(s.tick_ticks);
        self.write_u64(s.compose_ticks);
        self.write_u64(s.present_ticks);
    }

    fn on_panel(&mut self, e: &PanelEvent) {
        self.write_u8(TAG_PANEL);
        self.write_u64(e.frame_index);
        self.write_usize(e.index);
        self.write_f64(e.angle);
        self.write_f64(e.extent);
        self.write_bool(e.folds_inward);
        self.write_bool(e.interactive);
        self.write_usize(e.layer_count);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`PhaseBeginEvent`].
    PhaseBegin(PhaseBeginEvent),
    /// A [`PhaseEndEvent`].
    PhaseEnd(PhaseEndEvent),
    /// A [`FrameEvent`].
    Frame(FrameEvent),
    /// An [`AnimationTraceEvent`].
    Animation(AnimationTraceEvent),
    /// A [`FrameSummary`].
    FrameSummary(FrameSummary),
    /// A [`PanelEvent`].
    Panel(PanelEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
///
/// Iteration stops at the first unknown tag or truncated record.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_usize(&mut self) -> Option<usize> {
        usize::try_from(self.read_u64()?).ok()
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_phase(&mut self) -> Option<PhaseKind> {
        Some(match self.read_u8()? {
            0 => PhaseKind::Tick,
            1 => PhaseKind::Compose,
            _ => PhaseKind::Present,
        })
    }

    fn read_animation_phase(&mut self) -> Option<AnimationPhase> {
        Some(match self.read_u8()? {
            0 => AnimationPhase::Idle,
            1 => AnimationPhase::Animating,
            _ => AnimationPhase::Unmounted,
        })
    }

    fn read_animation_kind(&mut self) -> Option<AnimationEventKind> {
        Some(match self.read_u8()? {
            0 => AnimationEventKind::Started,
            1 => AnimationEventKind::Superseded,
            2 => AnimationEventKind::Settled,
            _ => AnimationEventKind::Cancelled,
        })
    }

    fn decode_phase_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseBegin(PhaseBeginEvent {
            frame_index: self.read_u64()?,
            phase: self.read_phase()?,
            timestamp: HostTime(self.read_u64()?),
        }))
    }

    fn decode_phase_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseEnd(PhaseEndEvent {
            frame_index: self.read_u64()?,
            phase: self.read_phase()?,
            timestamp: HostTime(self.read_u64()?),
        }))
    }

    fn decode_frame(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Frame(FrameEvent {
            frame_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
            unfold: self.read_f64()?,
            target_unfold: self.read_f64()?,
            phase: self.read_animation_phase()?,
            mounted_panels: self.read_usize()?,
            content_extent: self.read_f64()?,
        }))
    }

    fn decode_animation(&mut self) -> Option<RecordedEvent> {
        let at = HostTime(self.read_u64()?);
        Some(RecordedEvent::Animation(AnimationTraceEvent {
            at,
            event: AnimationEvent {
                kind: self.read_animation_kind()?,
                from: self.read_f64()?,
                to: self.read_f64()?,
            },
        }))
    }

    fn decode_frame_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameSummary(FrameSummary {
            frame_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
            unfold: self.read_f64()?,
            mounted_panels: self.read_usize()?,
            tick_ticks: self.read_u64()?,
            compose_ticks: self.read_u64()?,
            present_ticks: self.read_u64()?,
        }))
    }

    fn decode_panel(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Panel(PanelEvent {
            frame_index: self.read_u64()?,
            index: self.read_usize()?,
            angle: self.read_f64()?,
            extent: self.read_f64()?,
            folds_inward: self.read_bool()?,
            interactive: self.read_bool()?,
            layer_count: self.read_usize()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_PHASE_BEGIN => self.decode_phase_begin(),
            TAG_PHASE_END => self.decode_phase_end(),
            TAG_FRAME => self.decode_frame(),
            TAG_ANIMATION => self.decode_animation(),
            TAG_FRAME_SUMMARY => self.decode_frame_summary(),
            TAG_PANEL => self.decode_panel(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
