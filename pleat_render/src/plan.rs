// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: an ordered sequence of draw items for one frame.

use alloc::vec::Vec;

use kurbo::Rect;
use pleat_core::axis::FoldAxis;
use pleat_core::backend::Presenter;
use pleat_core::decoration::{PaintLayer, Placement};
use pleat_core::layout::{ComposedFrame, ComposedPanel};
use pleat_core::transform::Transform3d;

/// Blend mode for compositing a render item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Standard source-over alpha compositing.
    #[default]
    SourceOver,
    /// Multiply blend.
    Multiply,
    /// Screen blend.
    Screen,
}

/// A single draw command in the render plan.
///
/// Items are produced in panel index order. Adjacent panels never overlap, so
/// index order is also a valid back-to-front order.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderItem<V> {
    /// The panel this item originates from.
    pub panel_index: usize,
    /// The panel's content.
    pub content: V,
    /// Panel-local to parent transform (column-major 4x4).
    ///
    /// Panel-local space is the unprojected `item_extent` box with its origin
    /// at the box's top-left corner.
    pub world_transform: [f32; 16],
    /// Visible bounds in parent coordinates.
    pub bounds: Rect,
    /// Effective opacity (0.0–1.0). Zero for fully collapsed panels.
    pub effective_opacity: f32,
    /// Clip to apply in parent coordinates, if the panel is folded.
    pub clip: Option<Rect>,
    /// Decoration layers, in panel-local coordinates.
    pub layers: Vec<PaintLayer>,
    /// Whether the panel accepts pointer input.
    pub interactive: bool,
    /// Blend mode.
    pub blend_mode: BlendMode,
}

impl<V> RenderItem<V> {
    /// Iterates the layers painted before the content.
    pub fn layers_below(&self) -> impl Iterator<Item = &PaintLayer> {
        self.layers.iter().filter(|l| l.placement == Placement::Below)
    }

    /// Iterates the layers painted after the content.
    pub fn layers_above(&self) -> impl Iterator<Item = &PaintLayer> {
        self.layers.iter().filter(|l| l.placement == Placement::Above)
    }

    /// Returns `true` if drawing this item would produce no pixels.
    #[must_use]
    pub fn is_invisible(&self) -> bool {
        self.effective_opacity <= 0.0
    }
}

/// An ordered list of draw commands for a single frame of one strip.
///
/// Backends translate this into native compositor operations or GPU draw
/// calls depending on their rendering strategy.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan<V> {
    /// Opacity inherited from the host, multiplied into every item.
    pub opacity: f32,
    /// Blend mode assigned to every item.
    pub blend_mode: BlendMode,
    /// The strip's bounds in parent coordinates.
    pub viewport: Rect,
    /// Draw items in index order.
    pub items: Vec<RenderItem<V>>,
}

impl<V> Default for RenderPlan<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RenderPlan<V> {
    /// Creates an empty, fully opaque render plan.
    #[must_use]
    pub fn new() -> Self {
        Self {
            opacity: 1.0,
            blend_mode: BlendMode::SourceOver,
            viewport: Rect::ZERO,
            items: Vec::new(),
        }
    }

    /// Sets the inherited opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Sets the item blend mode.
    #[must_use]
    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
        self.viewport = Rect::ZERO;
    }
}

impl<V: Clone> RenderPlan<V> {
    /// Lowers a composed frame into a fresh, fully opaque plan.
    #[must_use]
    pub fn from_frame(frame: &ComposedFrame<V>) -> Self {
        let mut plan = Self::new();
        plan.rebuild(frame);
        plan
    }

    /// Replaces the plan's items with those of `frame`, reusing storage and
    /// keeping the plan's opacity and blend mode.
    pub fn rebuild(&mut self, frame: &ComposedFrame<V>) {
        self.items.clear();
        self.viewport = frame.strip_rect;
        let (opacity, blend_mode) = (self.opacity, self.blend_mode);
        self.items.extend(frame.panels.iter().map(|panel| {
            let collapsed = panel.projection.extent(frame.axis) <= 0.0;
            RenderItem {
                panel_index: panel.index,
                content: panel.visual.content.clone(),
                world_transform: world_transform(panel, frame.axis).to_cols_f32(),
                bounds: panel.rect,
                effective_opacity: if collapsed { 0.0 } else { opacity },
                clip: (panel.rect != panel.layout_rect).then_some(panel.rect),
                layers: panel.visual.layers.clone(),
                interactive: panel.interactive,
                blend_mode,
            }
        }));
    }
}

/// A [`RenderPlan`] is itself a presenter: applying a frame rebuilds it.
impl<V: Clone> Presenter<V> for RenderPlan<V> {
    fn apply(&mut self, frame: &ComposedFrame<V>) {
        self.rebuild(frame);
    }

    fn teardown(&mut self) {
        self.clear();
    }
}

/// Computes the panel-local to parent transform of a composed panel:
///
/// ```text
/// translate(anchor) · hinge_transform · translate(-anchor_local)
/// ```
///
/// where `anchor_local` is the hinge point relative to the panel's layout box.
#[must_use]
pub fn world_transform<V>(panel: &ComposedPanel<V>, axis: FoldAxis) -> Transform3d {
    let anchor = panel.anchor_point;
    let local = anchor - panel.layout_rect.origin();
    Transform3d::from_translation(anchor.x, anchor.y, 0.0)
        * panel.projection.hinge_transform(axis)
        * Transform3d::from_translation(-local.x, -local.y, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::Size;
    use pleat_core::config::FoldConfig;
    use pleat_core::content::ContentSource;
    use pleat_core::decoration::Decoration;
    use pleat_core::layout::compose;

    fn frame(unfold: f64) -> ComposedFrame<char> {
        compose(
            &FoldConfig::new(100.0),
            &ContentSource::from(vec!['a', 'b', 'c']),
            &Decoration::default(),
            unfold,
            Size::new(200.0, 600.0),
        )
    }

    fn project(cols: &[f32; 16], x: f32, y: f32) -> (f32, f32) {
        let w = cols[3] * x + cols[7] * y + cols[15];
        (
            (cols[0] * x + cols[4] * y + cols[12]) / w,
            (cols[1] * x + cols[5] * y + cols[13]) / w,
        )
    }

    #[test]
    fn open_strip_is_plain_translation() {
        let plan = RenderPlan::from_frame(&frame(1.0));
        assert_eq!(plan.items.len(), 3);
        assert_eq!(plan.viewport, Rect::new(0.0, 0.0, 200.0, 300.0));
        let second = &plan.items[1];
        assert_eq!(second.panel_index, 1);
        assert_eq!(second.content, 'b');
        assert_eq!(second.clip, None);
        assert_eq!(second.effective_opacity, 1.0);
        let (x, y) = project(&second.world_transform, 0.0, 0.0);
        assert!((x - 0.0).abs() < 1e-4 && (y - 100.0).abs() < 1e-4, "({x}, {y})");
    }

    #[test]
    fn folded_panels_map_onto_their_visible_bounds() {
        let f = frame(0.5);
        let plan = RenderPlan::from_frame(&f);
        for item in &plan.items {
            let panel = f.panel(item.panel_index).unwrap();
            assert_eq!(item.clip, Some(panel.rect));
            // The panel's hinge edge stays fixed; the far edge lands on the
            // opposite side of the visible bounds.
            let (_, top) = project(&item.world_transform, 100.0, 0.0);
            let (_, bottom) = project(&item.world_transform, 100.0, 100.0);
            #[expect(clippy::cast_possible_truncation, reason = "test tolerance is f32")]
            let (y0, y1) = (panel.rect.y0 as f32, panel.rect.y1 as f32);
            assert!((top - y0).abs() < 1e-3, "top {top} vs {y0}");
            assert!((bottom - y1).abs() < 1e-3, "bottom {bottom} vs {y1}");
        }
    }

    #[test]
    fn collapsed_panels_are_invisible() {
        let plan = RenderPlan::from_frame(&frame(0.0));
        assert!(plan.items.iter().all(RenderItem::is_invisible));
    }

    #[test]
    fn rebuild_keeps_plan_settings() {
        let mut plan = RenderPlan::new()
            .with_opacity(0.5)
            .with_blend_mode(BlendMode::Multiply);
        plan.apply(&frame(1.0));
        assert!(plan.items.iter().all(|i| i.effective_opacity == 0.5));
        assert!(plan.items.iter().all(|i| i.blend_mode == BlendMode::Multiply));

        plan.teardown();
        assert!(plan.items.is_empty());
        assert_eq!(plan.opacity, 0.5);
    }

    #[test]
    fn layers_split_around_content() {
        let plan = RenderPlan::from_frame(&frame(0.5));
        let first = &plan.items[0];
        assert_eq!(first.layers_below().count(), 0);
        assert!(first.layers_above().count() > 0);
    }
}
