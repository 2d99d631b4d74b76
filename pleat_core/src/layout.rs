// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame layout and compositing.
//!
//! [`compose`] turns one unfold snapshot into a [`ComposedFrame`]: every
//! mounted panel with its projection, visible bounds, full layout box, hinge
//! point, interaction flag, and decorated visual. Coordinates are relative to
//! the parent box, whose origin is `(0, 0)`.
//!
//! Panels are placed back to back along the axis: each panel's leading edge
//! is the previous panel's trailing edge. Visible bounds are exactly the
//! projected extent; the full `item_extent` box is held against the hinge
//! edge and overflows the visible bounds while folded.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::axis::{AxisSize, FoldAxis};
use crate::config::FoldConfig;
use crate::content::ContentSource;
use crate::decoration::{Decoration, RenderInfo, Visual};
use crate::fold::{PanelSpec, ProjectedFrame, clamp_unfold};

/// One mounted panel of a composed frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedPanel<V> {
    /// 0-based panel index.
    pub index: usize,
    /// Geometry from the fold engine.
    pub projection: ProjectedFrame,
    /// Visible bounds: the projected extent along the axis.
    pub rect: Rect,
    /// The unprojected `item_extent` box, sharing the hinge with `rect`.
    pub layout_rect: Rect,
    /// The hinge point, about which `projection.hinge_transform` applies.
    pub anchor_point: Point,
    /// Whether the panel accepts pointer input this frame.
    pub interactive: bool,
    /// Whether the panel folds toward the viewer.
    pub folds_inward: bool,
    /// Decorated content.
    pub visual: Visual<V>,
}

/// The result of laying out a strip for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedFrame<V> {
    /// Mounted panels in index order. Empty when unmounted on fold.
    pub panels: Vec<ComposedPanel<V>>,
    /// The strip's own bounds within the parent.
    pub strip_rect: Rect,
    /// Sum of projected panel extents along the axis.
    pub content_extent: f64,
    /// The clamped unfold value every panel was computed from.
    pub unfold: f64,
    /// Strip axis.
    pub axis: FoldAxis,
    /// Number of panels in the content source, mounted or not.
    pub item_count: usize,
}

impl<V> ComposedFrame<V> {
    /// A frame for a strip that has been torn down: no panels, no extent.
    #[must_use]
    pub fn unmounted(axis: FoldAxis, unfold: f64, item_count: usize) -> Self {
        Self {
            panels: Vec::new(),
            strip_rect: Rect::ZERO,
            content_extent: 0.0,
            unfold: clamp_unfold(unfold),
            axis,
            item_count,
        }
    }

    /// Returns the mounted panel with the given index.
    #[must_use]
    pub fn panel(&self, index: usize) -> Option<&ComposedPanel<V>> {
        self.panels.iter().find(|panel| panel.index == index)
    }

    /// Returns the topmost interactive panel whose visible bounds contain
    /// `point`.
    ///
    /// Non-interactive and fully collapsed panels never match.
    #[must_use]
    pub fn panel_at(&self, point: Point) -> Option<&ComposedPanel<V>> {
        self.panels
            .iter()
            .rev()
            .filter(|panel| panel.interactive)
            .find(|panel| panel.rect.contains(point))
    }

    /// Returns `true` if no panel is mounted.
    #[must_use]
    pub fn is_unmounted(&self) -> bool {
        self.panels.is_empty()
    }
}

/// Lays out every panel of a strip at `unfold` inside a parent of size
/// `parent`.
///
/// `unfold` is clamped once and shared by all panels. A non-finite parent
/// extent along the axis behaves as shrink-to-fit at offset zero; a
/// non-finite cross extent gives zero-width panels.
#[must_use]
pub fn compose<V: Clone>(
    config: &FoldConfig,
    content: &ContentSource<V>,
    decoration: &Decoration<V>,
    unfold: f64,
    parent: Size,
) -> ComposedFrame<V> {
    let unfold = clamp_unfold(unfold);
    let axis = config.axis;
    let item_count = content.len();

    let projections: Vec<(PanelSpec, ProjectedFrame)> = (0..item_count)
        .map(|index| {
            let spec = PanelSpec::new(index, config.item_extent, config.first_child_folds_inward);
            (spec, spec.project(axis, config.perspective, unfold))
        })
        .collect();
    let content_extent: f64 = projections.iter().map(|(_, p)| p.extent(axis)).sum();

    let available = axis.main(parent);
    let cross = finite_or_zero(axis.cross(parent));
    let offset = if available.is_finite() {
        config.axis_alignment.offset(available, content_extent)
    } else {
        0.0
    };
    let strip_rect = match config.axis_size {
        AxisSize::FillAvailable if available.is_finite() => {
            axis.pack_rect(0.0, available, 0.0, cross)
        }
        _ => axis.pack_rect(offset, offset + content_extent, 0.0, cross),
    };

    let mut frame = ComposedFrame {
        panels: Vec::new(),
        strip_rect,
        content_extent,
        unfold,
        axis,
        item_count,
    };
    if config.unmount_on_fold && unfold == 0.0 {
        return frame;
    }

    let interactive = config.is_interactive(unfold);
    let full_size = axis.pack_size(config.item_extent, cross);
    let mut cursor = offset;
    frame.panels.reserve(item_count);
    for (spec, projection) in projections {
        let extent = projection.extent(axis);
        let rect = axis.pack_rect(cursor, cursor + extent, 0.0, cross);
        cursor += extent;

        let Some(item) = content.get(spec.index) else {
            continue;
        };
        let info = RenderInfo {
            index: spec.index,
            item_count,
            unfold,
            folds_inward: spec.folds_inward,
            axis,
            item_extent: config.item_extent,
        };
        frame.panels.push(ComposedPanel {
            index: spec.index,
            projection,
            rect,
            layout_rect: projection.anchor.align_within(rect, full_size),
            anchor_point: projection.anchor.point_in(rect),
            interactive,
            folds_inward: spec.folds_inward,
            visual: decoration.apply(&info, Visual::new(item)),
        });
    }
    frame
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
