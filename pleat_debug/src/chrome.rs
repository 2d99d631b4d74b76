// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Frame phases become duration slices, animation events and panels become
//! instants, and the unfold value is exported as a counter track.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use pleat_core::time::Timebase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
/// Panel events carry no timestamp of their own and are placed at the most
/// recent phase boundary.
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut last_ts = 0.0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::PhaseBegin(e) => {
                last_ts = ticks_to_us(e.timestamp.ticks(), timebase);
                events.push(json!({
                    "ph": "B",
                    "name": format!("{:?}", e.phase),
                    "cat": "Frame",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::PhaseEnd(e) => {
                last_ts = ticks_to_us(e.timestamp.ticks(), timebase);
                events.push(json!({
                    "ph": "E",
                    "name": format!("{:?}", e.phase),
                    "cat": "Frame",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::Frame(e) => {
                let ts = ticks_to_us(e.now.ticks(), timebase);
                events.push(json!({
                    "ph": "C",
                    "name": "unfold",
                    "ts": ts,
                    "pid": 0,
                    "args": {
                        "unfold": e.unfold,
                        "target": e.target_unfold,
                    }
                }));
                events.push(json!({
                    "ph": "i",
                    "name": "Frame",
                    "cat": "Frame",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "phase": format!("{:?}", e.phase),
                        "mounted_panels": e.mounted_panels,
                        "content_extent": e.content_extent,
                    }
                }));
            }
            RecordedEvent::Animation(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.event.kind),
                    "cat": "Animation",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "from": e.event.from,
                        "to": e.event.to,
                    }
                }));
            }
            RecordedEvent::FrameSummary(s) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FrameSummary",
                    "cat": "Summary",
                    "ts": ticks_to_us(s.now.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": s.frame_index,
                        "unfold": s.unfold,
                        "mounted_panels": s.mounted_panels,
                        "tick_us": ticks_to_us(s.tick_ticks, timebase),
                        "compose_us": ticks_to_us(s.compose_ticks, timebase),
                        "present_us": ticks_to_us(s.present_ticks, timebase),
                    }
                }));
            }
            RecordedEvent::Panel(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Panel",
                    "cat": "Rich",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": 2,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "index": e.index,
                        "angle": e.angle,
                        "extent": e.extent,
                        "folds_inward": e.folds_inward,
                        "interactive": e.interactive,
                        "layer_count": e.layer_count,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}
