// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of a fold strip driven frame by frame.

use kurbo::{Point, Size};
use pleat_core::animation::{AnimationPhase, AnimationSpec, Easing};
use pleat_core::axis::{AxisAlignment, FoldAxis};
use pleat_core::config::FoldConfig;
use pleat_core::content::ContentSource;
use pleat_core::decoration::{Decoration, LayerRole};
use pleat_core::layout::ComposedFrame;
use pleat_core::strip::FoldStrip;
use pleat_core::time::{Duration, HostTime, Timebase};
use pleat_core::timing::FrameTick;
use pleat_core::trace::Tracer;

const FRAME: Duration = Duration::from_millis(16, Timebase::NANOS);
const PARENT: Size = Size::new(240.0, 800.0);

fn strip(config: FoldConfig) -> FoldStrip<usize> {
    FoldStrip::new(
        config,
        ContentSource::indexed(3, |i| i),
        Decoration::default(),
    )
    .unwrap()
}

fn run_until_idle(strip: &mut FoldStrip<usize>, mut tick: FrameTick) -> Vec<ComposedFrame<usize>> {
    let mut frames = Vec::new();
    let mut tracer = Tracer::none();
    for _ in 0..1_000 {
        tick = tick.next(FRAME);
        strip.tick(&tick, &mut tracer);
        frames.push(strip.compose(PARENT));
        if strip.phase() == AnimationPhase::Idle {
            break;
        }
    }
    frames
}

#[test]
fn opening_three_panels_settles_at_full_height() {
    let config = FoldConfig::new(100.0)
        .with_target_unfold(0.0)
        .with_animation(AnimationSpec {
            duration: Duration::from_millis(300, Timebase::NANOS),
            easing: Easing::EaseInOut,
        });
    let mut s = strip(config);
    assert_eq!(s.compose(PARENT).content_extent, 0.0);

    let start = FrameTick::new(HostTime(0), 0);
    assert!(s.set_target_unfold(1.0, start.now, &mut Tracer::none()).unwrap());
    let frames = run_until_idle(&mut s, start);

    let heights: Vec<f64> = frames.iter().map(|f| f.content_extent).collect();
    for pair in heights.windows(2) {
        assert!(pair[1] >= pair[0], "height shrank: {pair:?}");
    }
    let last = frames.last().unwrap();
    assert!((last.content_extent - 300.0).abs() < 1e-9);
    assert_eq!(last.strip_rect.height(), last.content_extent);
    assert_eq!(s.unfold(), 1.0);
}

#[test]
fn retargeting_mid_flight_continues_from_the_current_value() {
    let config = FoldConfig::new(100.0).with_animation(AnimationSpec {
        duration: Duration::from_millis(160, Timebase::NANOS),
        easing: Easing::Linear,
    });
    let mut s = strip(config);
    let mut tracer = Tracer::none();
    let mut tick = FrameTick::new(HostTime(0), 0);
    s.set_target_unfold(0.0, tick.now, &mut tracer).unwrap();
    for _ in 0..5 {
        tick = tick.next(FRAME);
        s.tick(&tick, &mut tracer);
    }
    let midway = s.unfold();
    assert!((midway - 0.5).abs() < 1e-9);

    s.set_target_unfold(1.0, tick.now, &mut tracer).unwrap();
    assert_eq!(s.unfold(), midway);
    let frames = run_until_idle(&mut s, tick);
    assert!(frames.iter().all(|f| f.unfold >= midway));
    assert_eq!(s.unfold(), 1.0);
}

#[test]
fn threshold_blocks_input_until_fully_open() {
    let config = FoldConfig::new(100.0)
        .with_target_unfold(0.0)
        .with_interaction_unfold_threshold(Some(1.0))
        .with_animation(AnimationSpec {
            duration: Duration::from_millis(100, Timebase::NANOS),
            easing: Easing::EaseOut,
        });
    let mut s = strip(config);
    let start = FrameTick::new(HostTime(0), 0);
    s.set_target_unfold(1.0, start.now, &mut Tracer::none()).unwrap();
    let frames = run_until_idle(&mut s, start);

    let (settled, transient) = frames.split_last().unwrap();
    for frame in transient {
        assert!(frame.unfold < 1.0);
        assert!(frame.panels.iter().all(|p| !p.interactive));
        assert!(frame.panel_at(Point::new(10.0, 5.0)).is_none());
    }
    assert!(settled.panels.iter().all(|p| p.interactive));
    assert_eq!(settled.panel_at(Point::new(10.0, 250.0)).map(|p| p.index), Some(2));
}

#[test]
fn unmount_on_fold_only_drops_content_at_zero() {
    let config = FoldConfig::new(100.0)
        .with_target_unfold(0.0)
        .with_unmount_on_fold(true);
    let mut s = strip(config);
    assert!(s.compose(PARENT).is_unmounted());

    let mut tracer = Tracer::none();
    let start = FrameTick::new(HostTime(0), 0);
    s.set_target_unfold(1.0, start.now, &mut tracer).unwrap();
    s.tick(&start.next(FRAME), &mut tracer);
    let frame = s.compose(PARENT);
    assert!(frame.unfold > 0.0);
    assert_eq!(frame.panels.len(), 3);
}

#[test]
fn alignment_places_the_open_strip() {
    for (alignment, top) in [
        (AxisAlignment::Start, 0.0),
        (AxisAlignment::Center, 250.0),
        (AxisAlignment::End, 500.0),
    ] {
        let s = strip(FoldConfig::new(100.0).with_axis_alignment(alignment));
        let frame = s.compose(PARENT);
        assert_eq!(frame.panels[0].rect.y0, top, "{alignment:?}");
        assert_eq!(frame.panels[2].rect.y1, top + 300.0, "{alignment:?}");
    }
}

#[test]
fn setting_the_current_target_does_not_animate() {
    let mut s = strip(FoldConfig::new(100.0).with_target_unfold(0.4));
    let changed = s
        .set_target_unfold(0.4, HostTime(1_000), &mut Tracer::none())
        .unwrap();
    assert!(!changed);
    assert_eq!(s.phase(), AnimationPhase::Idle);
    assert_eq!(s.unfold(), 0.4);
}

#[test]
fn parity_flip_mirrors_every_panel() {
    let base = FoldConfig::new(80.0)
        .with_axis(FoldAxis::Horizontal)
        .with_target_unfold(0.3);
    let a = strip(base).compose(PARENT);
    let b = strip(base.with_first_child_folds_inward(false)).compose(PARENT);
    for (pa, pb) in a.panels.iter().zip(&b.panels) {
        assert_eq!(pa.projection.angle, -pb.projection.angle);
        assert_ne!(pa.folds_inward, pb.folds_inward);
    }
}

#[test]
fn default_decoration_shades_until_fully_open() {
    let folded = strip(FoldConfig::new(100.0).with_target_unfold(0.5)).compose(PARENT);
    let inward = folded.panel(0).unwrap();
    assert!(
        inward
            .visual
            .layers
            .iter()
            .any(|l| l.role == LayerRole::InwardCrease && l.opacity > 0.0)
    );

    let open = strip(FoldConfig::new(100.0)).compose(PARENT);
    assert!(
        open.panels
            .iter()
            .flat_map(|p| &p.visual.layers)
            .all(|l| l.opacity == 0.0)
    );
}
