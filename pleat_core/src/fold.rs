// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-panel fold geometry.
//!
//! Every panel is rotated about its hinge by an angle derived from the shared
//! unfold value, then projected with a small perspective term:
//!
//! ```text
//!   |angle|   = (1 - unfold) * π/2
//!   sign      = direction (+1 inward, -1 outward) * axis (+1 vertical, -1 horizontal)
//!   transform = Perspective(3,2 = strength) * Rotation{X|Y}(angle)
//!   extent    = |far_edge'.axis| / |far_edge'.w|
//! ```
//!
//! where `far_edge = (±item_extent, 0, 0, 1)` along the fold axis. With these
//! sign conventions the far edge always recedes into `+z`, so `w >= 1` and the
//! projected extent stays within `[0, item_extent]`, growing monotonically
//! with `unfold`.
//!
//! Panels never read each other's geometry. [`project`] is pure and O(1), so
//! a frame is simply `N` independent calls with one shared unfold snapshot.

use core::f64::consts::FRAC_PI_2;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Size;

use crate::axis::{Anchor, FoldAxis};
use crate::transform::Transform3d;

/// Projected extents below this fraction of the item extent snap to zero.
const COLLAPSE_EPSILON: f64 = 1e-9;

/// Immutable per-panel input to the geometry engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelSpec {
    /// 0-based position in the strip.
    pub index: usize,
    /// Fixed size along the fold axis.
    pub item_extent: f64,
    /// Whether this panel folds toward the viewer.
    pub folds_inward: bool,
}

impl PanelSpec {
    /// Creates the spec for panel `index`, deriving its fold direction from
    /// the strip-wide parity base.
    #[inline]
    #[must_use]
    pub const fn new(index: usize, item_extent: f64, first_child_folds_inward: bool) -> Self {
        Self {
            index,
            item_extent,
            folds_inward: folds_inward(index, first_child_folds_inward),
        }
    }

    /// Projects this panel at the given unfold value.
    #[inline]
    #[must_use]
    pub fn project(&self, axis: FoldAxis, perspective: f64, unfold: f64) -> ProjectedFrame {
        project(axis, self.item_extent, perspective, self.folds_inward, unfold)
    }
}

/// The geometry of one panel for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedFrame {
    /// Signed rotation angle in radians.
    pub angle: f64,
    /// Perspective rotation, applied about [`anchor`](Self::anchor).
    pub transform: Transform3d,
    /// Visible bounding size. Finite along the fold axis; `f64::INFINITY`
    /// across it, meaning "fill the available cross-axis space".
    pub projected_size: Size,
    /// The hinge: the point of the panel box held fixed during rotation.
    pub anchor: Anchor,
}

impl ProjectedFrame {
    /// Returns the foreshortened extent along `axis`.
    #[inline]
    #[must_use]
    pub const fn extent(&self, axis: FoldAxis) -> f64 {
        axis.main(self.projected_size)
    }

    /// Returns the fold transform in hinge-relative screen coordinates.
    ///
    /// [`transform`](Self::transform) measures the far edge on the side given
    /// by the fold direction, while on screen the panel body always lies on
    /// the side away from its [`anchor`](Self::anchor). Mirroring along the
    /// axis on both sides reconciles the two, so the panel's far edge lands
    /// exactly [`extent`](Self::extent) away from the hinge.
    #[must_use]
    pub fn hinge_transform(&self, axis: FoldAxis) -> Transform3d {
        let mirror = match axis {
            FoldAxis::Vertical => Transform3d::from_scale(1.0, -1.0, 1.0),
            FoldAxis::Horizontal => Transform3d::from_scale(-1.0, 1.0, 1.0),
        };
        mirror * self.transform * mirror
    }
}

/// Returns whether panel `index` folds inward.
///
/// Even indices share the direction given by `first_child_folds_inward`; odd
/// indices take the opposite one.
#[inline]
#[must_use]
pub const fn folds_inward(index: usize, first_child_folds_inward: bool) -> bool {
    (index % 2 == 0) == first_child_folds_inward
}

/// Clamps an unfold value into `[0, 1]`, mapping NaN to `0`.
///
/// Easing curves that overshoot can briefly push the animated value outside
/// the unit range; geometry must never see those values.
#[inline]
#[must_use]
pub fn clamp_unfold(unfold: f64) -> f64 {
    if unfold.is_nan() {
        0.0
    } else {
        unfold.clamp(0.0, 1.0)
    }
}

/// Returns the signed fold angle in radians.
#[inline]
#[must_use]
pub fn fold_angle(axis: FoldAxis, folds_inward: bool, unfold: f64) -> f64 {
    let magnitude = (1.0 - clamp_unfold(unfold)) * FRAC_PI_2;
    let direction = if folds_inward { 1.0 } else { -1.0 };
    let axis_sign = match axis {
        FoldAxis::Vertical => 1.0,
        FoldAxis::Horizontal => -1.0,
    };
    magnitude * direction * axis_sign
}

/// Returns the hinge anchor for a panel.
#[inline]
#[must_use]
pub const fn hinge_anchor(axis: FoldAxis, folds_inward: bool) -> Anchor {
    match (axis, folds_inward) {
        (FoldAxis::Vertical, true) => Anchor::BottomCenter,
        (FoldAxis::Vertical, false) => Anchor::TopCenter,
        (FoldAxis::Horizontal, true) => Anchor::CenterRight,
        (FoldAxis::Horizontal, false) => Anchor::CenterLeft,
    }
}

/// Computes the rotation, perspective transform, projected size, and hinge
/// anchor of one panel.
///
/// `item_extent` and `perspective` are validated at configuration time;
/// `unfold` is clamped here.
#[must_use]
pub fn project(
    axis: FoldAxis,
    item_extent: f64,
    perspective: f64,
    folds_inward: bool,
    unfold: f64,
) -> ProjectedFrame {
    let angle = fold_angle(axis, folds_inward, unfold);
    let rotation = match axis {
        FoldAxis::Vertical => Transform3d::from_rotation_x(angle),
        FoldAxis::Horizontal => Transform3d::from_rotation_y(angle),
    };
    let transform = Transform3d::from_perspective(perspective) * rotation;

    let reach = if folds_inward {
        item_extent
    } else {
        -item_extent
    };
    let far_edge = match axis {
        FoldAxis::Vertical => [0.0, reach, 0.0, 1.0],
        FoldAxis::Horizontal => [reach, 0.0, 0.0, 1.0],
    };
    let projected = transform.transform_point(far_edge);
    let along = match axis {
        FoldAxis::Vertical => projected[1],
        FoldAxis::Horizontal => projected[0],
    };
    let mut extent = along.abs() / projected[3].abs();
    if !extent.is_finite() || extent < item_extent * COLLAPSE_EPSILON {
        extent = 0.0;
    }

    ProjectedFrame {
        angle,
        transform,
        projected_size: axis.pack_size(extent, f64::INFINITY),
        anchor: hinge_anchor(axis, folds_inward),
    }
}

/// Sums the projected extents of `count` equally sized panels.
#[must_use]
pub fn total_extent(
    axis: FoldAxis,
    count: usize,
    item_extent: f64,
    perspective: f64,
    first_child_folds_inward: bool,
    unfold: f64,
) -> f64 {
    (0..count)
        .map(|index| {
            PanelSpec::new(index, item_extent, first_child_folds_inward)
                .project(axis, perspective, unfold)
                .extent(axis)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const AXES: [FoldAxis; 2] = [FoldAxis::Vertical, FoldAxis::Horizontal];

    #[test]
    fn fully_unfolded_is_exact_item_extent() {
        for axis in AXES {
            for inward in [true, false] {
                for extent in [1.0, 37.5, 100.0, 4096.0] {
                    let frame = project(axis, extent, 0.001, inward, 1.0);
                    assert_eq!(frame.extent(axis), extent, "{axis:?} inward={inward}");
                    assert_eq!(frame.angle, 0.0);
                }
            }
        }
    }

    #[test]
    fn fully_folded_collapses_to_zero() {
        for axis in AXES {
            for inward in [true, false] {
                let frame = project(axis, 100.0, 0.001, inward, 0.0);
                assert_eq!(frame.extent(axis), 0.0, "{axis:?} inward={inward}");
                assert!((frame.angle.abs() - FRAC_PI_2).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn extent_shrinks_as_unfold_approaches_zero() {
        for axis in AXES {
            let mut previous = f64::INFINITY;
            for step in (0..=100).rev() {
                let unfold = f64::from(step) / 100.0;
                let extent = project(axis, 100.0, 0.001, true, unfold).extent(axis);
                assert!(extent <= previous, "not monotone at unfold={unfold}");
                assert!((0.0..=100.0).contains(&extent));
                previous = extent;
            }
            assert!(project(axis, 100.0, 0.001, true, 1e-6).extent(axis) < 1e-3);
        }
    }

    #[test]
    fn cross_axis_is_unbounded() {
        let frame = project(FoldAxis::Vertical, 100.0, 0.001, true, 0.5);
        assert!(frame.projected_size.width.is_infinite());
        assert!(frame.projected_size.height.is_finite());

        let frame = project(FoldAxis::Horizontal, 100.0, 0.001, true, 0.5);
        assert!(frame.projected_size.height.is_infinite());
        assert!(frame.projected_size.width.is_finite());
    }

    #[test]
    fn toggling_parity_flips_every_angle() {
        for axis in AXES {
            for index in 0..6 {
                for unfold in [0.1, 0.5, 0.9] {
                    let a = PanelSpec::new(index, 80.0, true).project(axis, 0.001, unfold);
                    let b = PanelSpec::new(index, 80.0, false).project(axis, 0.001, unfold);
                    assert!(a.angle != 0.0);
                    assert_eq!(a.angle, -b.angle, "index {index} unfold {unfold}");
                }
            }
        }
    }

    #[test]
    fn parity_alternates_direction() {
        assert!(folds_inward(0, true));
        assert!(!folds_inward(1, true));
        assert!(folds_inward(2, true));
        assert!(!folds_inward(0, false));
        assert!(folds_inward(1, false));
    }

    #[test]
    fn horizontal_and_vertical_wind_oppositely() {
        let v = fold_angle(FoldAxis::Vertical, true, 0.5);
        let h = fold_angle(FoldAxis::Horizontal, true, 0.5);
        assert!(v > 0.0);
        assert_eq!(v, -h);
    }

    #[test]
    fn anchors_sit_on_the_hinge() {
        assert_eq!(hinge_anchor(FoldAxis::Vertical, true), Anchor::BottomCenter);
        assert_eq!(hinge_anchor(FoldAxis::Vertical, false), Anchor::TopCenter);
        assert_eq!(hinge_anchor(FoldAxis::Horizontal, true), Anchor::CenterRight);
        assert_eq!(hinge_anchor(FoldAxis::Horizontal, false), Anchor::CenterLeft);
    }

    #[test]
    fn out_of_range_unfold_is_clamped() {
        let over = project(FoldAxis::Vertical, 100.0, 0.001, true, 1.2);
        assert_eq!(over.extent(FoldAxis::Vertical), 100.0);
        let under = project(FoldAxis::Vertical, 100.0, 0.001, false, -0.3);
        assert_eq!(under.extent(FoldAxis::Vertical), 0.0);
        let nan = project(FoldAxis::Horizontal, 100.0, 0.001, true, f64::NAN);
        assert_eq!(nan.extent(FoldAxis::Horizontal), 0.0);
        assert!(nan.transform.is_finite());
    }

    #[test]
    fn perspective_entry_is_present_in_transform() {
        let frame = project(FoldAxis::Vertical, 100.0, 0.002, true, 1.0);
        assert_eq!(frame.transform.entry(3, 2), 0.002);
    }

    #[test]
    fn hinge_transform_lands_far_edge_at_extent() {
        for axis in AXES {
            for inward in [true, false] {
                let frame = project(axis, 100.0, 0.001, inward, 0.4);
                // The panel body lies away from the hinge: above/left of a
                // trailing hinge, below/right of a leading one.
                let body = if inward { -100.0 } else { 100.0 };
                let p = match axis {
                    FoldAxis::Vertical => [0.0, body, 0.0, 1.0],
                    FoldAxis::Horizontal => [body, 0.0, 0.0, 1.0],
                };
                let out = frame.hinge_transform(axis).transform_point(p);
                let along = match axis {
                    FoldAxis::Vertical => out[1] / out[3],
                    FoldAxis::Horizontal => out[0] / out[3],
                };
                assert!(out[3] >= 1.0);
                assert!((along.abs() - frame.extent(axis)).abs() < 1e-9);
                assert_eq!(along.signum(), body.signum());
            }
        }
    }

    #[test]
    fn strip_totals_match_endpoints() {
        for axis in AXES {
            for n in [1, 2, 3, 7] {
                let open = total_extent(axis, n, 120.0, 0.001, true, 1.0);
                let n_f = f64::from(u32::try_from(n).unwrap());
                assert!((open - n_f * 120.0).abs() < 1e-9, "open = {open}");
                let closed = total_extent(axis, n, 120.0, 0.001, true, 0.0);
                assert!(closed.abs() < 1e-9, "closed = {closed}");
            }
        }
    }
}
