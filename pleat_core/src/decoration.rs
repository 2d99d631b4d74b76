// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-panel decoration: background fills, fold shading, and creases.
//!
//! Decoration runs once per mounted panel per frame. It receives a read-only
//! [`RenderInfo`] and the panel's [`Visual`], and returns the visual to
//! composite. Paint layers live in *panel-local* coordinates, i.e. in the
//! unprojected `item_extent` box, so they rotate together with the content.
//!
//! The default strategy is [`FoldShading`], which stacks, in order:
//!
//! 1. an optional background fill below the content,
//! 2. a flat overlay whose color depends on fold direction,
//! 3. up to two gradient creases fading away from the hinge.
//!
//! Overlay and crease opacity is `1 - unfold`, so a flat strip is unshaded.
//! Each of the four shading parts is enabled by its presence alone.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;
use peniko::{Brush, Color, ColorStop, Extend, Gradient, GradientKind, LinearGradientPosition};

use crate::axis::FoldAxis;
use crate::config::{ConfigError, is_unit};

/// Read-only facts about one panel in one frame, handed to decorations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderInfo {
    /// 0-based panel index.
    pub index: usize,
    /// Number of panels in the strip.
    pub item_count: usize,
    /// The frame's unfold value.
    pub unfold: f64,
    /// Whether this panel folds toward the viewer.
    pub folds_inward: bool,
    /// Strip axis.
    pub axis: FoldAxis,
    /// Unprojected panel size along the axis.
    pub item_extent: f64,
}

impl RenderInfo {
    /// Returns the panel-local axis coordinate of the hinge edge.
    ///
    /// Inward panels hinge on their trailing edge, outward panels on their
    /// leading edge.
    #[inline]
    #[must_use]
    pub fn hinge_offset(&self) -> f64 {
        if self.folds_inward {
            self.item_extent
        } else {
            0.0
        }
    }

    /// Returns the shading opacity for this frame, `1 - unfold`.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "opacity only needs f32 precision"
    )]
    pub fn fold_opacity(&self) -> f32 {
        (1.0 - self.unfold).clamp(0.0, 1.0) as f32
    }
}

/// What a paint layer represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// Solid fill behind the content.
    Background,
    /// Direction-dependent flat shade.
    Overlay,
    /// Gradient highlight for inward folds.
    InwardCrease,
    /// Gradient highlight for outward folds.
    OutwardCrease,
    /// A layer added by a custom decoration.
    Custom(u32),
}

/// Whether a layer paints below or above the panel content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Painted before the content.
    Below,
    /// Painted after the content.
    Above,
}

/// The part of the panel box a layer covers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coverage {
    /// The whole panel box.
    Full,
    /// A band across the panel spanning `[start, end]` along the fold axis,
    /// in panel-local units.
    Band {
        /// Leading edge of the band.
        start: f64,
        /// Trailing edge of the band.
        end: f64,
    },
}

impl Coverage {
    /// Resolves this coverage inside a panel box given in any coordinate
    /// space whose origin is the box's leading corner.
    #[must_use]
    pub fn resolve(self, axis: FoldAxis, panel_box: Rect) -> Rect {
        match self {
            Self::Full => panel_box,
            Self::Band { start, end } => {
                let (lead, _) = axis.main_span(panel_box);
                let (c0, c1) = match axis {
                    FoldAxis::Horizontal => (panel_box.y0, panel_box.y1),
                    FoldAxis::Vertical => (panel_box.x0, panel_box.x1),
                };
                axis.pack_rect(lead + start, lead + end, c0, c1)
            }
        }
    }
}

/// One paint operation attached to a panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintLayer {
    /// What the layer represents.
    pub role: LayerRole,
    /// Stacking relative to content.
    pub placement: Placement,
    /// Area covered.
    pub coverage: Coverage,
    /// Paint. Gradient coordinates are panel-local.
    pub brush: Brush,
    /// Layer opacity multiplier in `[0, 1]`.
    pub opacity: f32,
}

/// A panel's content plus the paint layers stacked around it.
#[derive(Clone, Debug, PartialEq)]
pub struct Visual<V> {
    /// Host content.
    pub content: V,
    /// Paint layers in stacking order.
    pub layers: Vec<PaintLayer>,
}

impl<V> Visual<V> {
    /// Wraps undecorated content.
    #[must_use]
    pub fn new(content: V) -> Self {
        Self {
            content,
            layers: Vec::new(),
        }
    }

    /// Appends a layer on top of existing layers with the same placement.
    pub fn push(&mut self, layer: PaintLayer) {
        self.layers.push(layer);
    }

    /// Iterates the layers painted below the content, bottom first.
    pub fn below(&self) -> impl Iterator<Item = &PaintLayer> {
        self.layers
            .iter()
            .filter(|layer| layer.placement == Placement::Below)
    }

    /// Iterates the layers painted above the content, bottom first.
    pub fn above(&self) -> impl Iterator<Item = &PaintLayer> {
        self.layers
            .iter()
            .filter(|layer| layer.placement == Placement::Above)
    }
}

/// A gradient highlight anchored at the hinge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crease {
    /// Color at the hinge; fades to transparent away from it.
    pub color: Color,
    /// Length of the gradient as a fraction of `item_extent`, in `[0, 1]`.
    pub extent: f64,
}

/// Stacking of the two creases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CreaseOrder {
    /// Outward crease painted first, inward crease on top.
    #[default]
    OutwardUnderInward,
    /// Inward crease painted first, outward crease on top.
    InwardUnderOutward,
}

/// The default fold shading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoldShading {
    /// Solid fill behind the content.
    pub background: Option<Color>,
    /// Flat shade applied to inward-folding panels.
    pub inward_overlay: Option<Color>,
    /// Flat shade applied to outward-folding panels.
    pub outward_overlay: Option<Color>,
    /// Crease used for the inward highlight.
    pub inward_crease: Option<Crease>,
    /// Crease used for the outward highlight.
    pub outward_crease: Option<Crease>,
    /// Stacking of the two creases.
    pub crease_order: CreaseOrder,
}

impl FoldShading {
    /// Default inward crease length, as a fraction of the item extent.
    pub const DEFAULT_INWARD_CREASE_EXTENT: f64 = 0.75;
    /// Default outward crease length, as a fraction of the item extent.
    pub const DEFAULT_OUTWARD_CREASE_EXTENT: f64 = 0.25;

    /// Shading with every part disabled.
    pub const NONE: Self = Self {
        background: None,
        inward_overlay: None,
        outward_overlay: None,
        inward_crease: None,
        outward_crease: None,
        crease_order: CreaseOrder::OutwardUnderInward,
    };

    /// Checks crease extents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CreaseExtentOutOfRange`] if a crease extent is
    /// outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for crease in [self.inward_crease, self.outward_crease].into_iter().flatten() {
            if !is_unit(crease.extent) {
                return Err(ConfigError::CreaseExtentOutOfRange(crease.extent));
            }
        }
        Ok(())
    }

    /// Adds this shading's layers to `visual`.
    #[must_use]
    pub fn decorate<V>(&self, info: &RenderInfo, mut visual: Visual<V>) -> Visual<V> {
        if let Some(color) = self.background {
            visual.push(PaintLayer {
                role: LayerRole::Background,
                placement: Placement::Below,
                coverage: Coverage::Full,
                brush: Brush::Solid(color),
                opacity: 1.0,
            });
        }

        let opacity = info.fold_opacity();
        let overlay = if info.folds_inward {
            self.inward_overlay
        } else {
            self.outward_overlay
        };
        if let Some(color) = overlay {
            visual.push(PaintLayer {
                role: LayerRole::Overlay,
                placement: Placement::Above,
                coverage: Coverage::Full,
                brush: Brush::Solid(color),
                opacity,
            });
        }

        let inward = self.inward_crease.map(|c| (LayerRole::InwardCrease, c));
        let outward = self.outward_crease.map(|c| (LayerRole::OutwardCrease, c));
        let ordered = match self.crease_order {
            CreaseOrder::OutwardUnderInward => [outward, inward],
            CreaseOrder::InwardUnderOutward => [inward, outward],
        };
        for (role, crease) in ordered.into_iter().flatten() {
            if let Some(layer) = crease_layer(info, role, crease, opacity) {
                visual.push(layer);
            }
        }
        visual
    }
}

impl Default for FoldShading {
    fn default() -> Self {
        Self {
            background: None,
            inward_overlay: Some(Color::from_rgba8(0, 0, 0, 48)),
            outward_overlay: None,
            inward_crease: Some(Crease {
                color: Color::from_rgba8(0, 0, 0, 96),
                extent: Self::DEFAULT_INWARD_CREASE_EXTENT,
            }),
            outward_crease: Some(Crease {
                color: Color::from_rgba8(255, 255, 255, 64),
                extent: Self::DEFAULT_OUTWARD_CREASE_EXTENT,
            }),
            crease_order: CreaseOrder::OutwardUnderInward,
        }
    }
}

/// Builds a crease band that starts at the hinge and fades toward the panel
/// interior.
fn crease_layer(
    info: &RenderInfo,
    role: LayerRole,
    crease: Crease,
    opacity: f32,
) -> Option<PaintLayer> {
    let length = crease.extent.clamp(0.0, 1.0) * info.item_extent;
    if length <= 0.0 {
        return None;
    }
    let hinge = info.hinge_offset();
    let fade_to = if info.folds_inward {
        hinge - length
    } else {
        hinge + length
    };
    let (p0, p1) = match info.axis {
        FoldAxis::Vertical => ((0.0, hinge), (0.0, fade_to)),
        FoldAxis::Horizontal => ((hinge, 0.0), (fade_to, 0.0)),
    };
    let stops = [
        ColorStop::from((0.0, crease.color)),
        ColorStop::from((1.0, crease.color.with_alpha(0.0))),
    ];
    let brush = Brush::Gradient(Gradient {
        kind: GradientKind::Linear(LinearGradientPosition::new(p0, p1)),
        extend: Extend::Pad,
        stops: stops.as_slice().into(),
        ..Gradient::default()
    });
    Some(PaintLayer {
        role,
        placement: Placement::Above,
        coverage: Coverage::Band {
            start: hinge.min(fade_to),
            end: hinge.max(fade_to),
        },
        brush,
        opacity,
    })
}

/// A decoration strategy.
pub enum Decoration<V> {
    /// Content is composited as-is.
    None,
    /// Built-in fold shading.
    Shading(FoldShading),
    /// A consumer-supplied transformation.
    Custom(Box<dyn Fn(&RenderInfo, Visual<V>) -> Visual<V>>),
}

impl<V> Decoration<V> {
    /// Wraps a custom decoration callback.
    #[must_use]
    pub fn custom(f: impl Fn(&RenderInfo, Visual<V>) -> Visual<V> + 'static) -> Self {
        Self::Custom(Box::new(f))
    }

    /// Checks the strategy's own options.
    ///
    /// # Errors
    ///
    /// Propagates [`FoldShading::validate`] failures.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Shading(shading) => shading.validate(),
            Self::None | Self::Custom(_) => Ok(()),
        }
    }

    /// Decorates one panel.
    #[must_use]
    pub fn apply(&self, info: &RenderInfo, visual: Visual<V>) -> Visual<V> {
        match self {
            Self::None => visual,
            Self::Shading(shading) => shading.decorate(info, visual),
            Self::Custom(f) => f(info, visual),
        }
    }
}

/// The default strategy is [`FoldShading::default`], never a no-op.
impl<V> Default for Decoration<V> {
    fn default() -> Self {
        Self::Shading(FoldShading::default())
    }
}

impl<V> From<FoldShading> for Decoration<V> {
    fn from(shading: FoldShading) -> Self {
        Self::Shading(shading)
    }
}

impl<V> fmt::Debug for Decoration<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Shading(shading) => f.debug_tuple("Shading").field(shading).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").finish_non_exhaustive(),
        }
    }
}
