// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis, anchor, and strip-alignment vocabulary.

use kurbo::{Point, Rect, Size};

/// The layout axis along which panels stack and fold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FoldAxis {
    /// Panels stack left to right and rotate about the Y axis.
    Horizontal,
    /// Panels stack top to bottom and rotate about the X axis.
    #[default]
    Vertical,
}

impl FoldAxis {
    /// Returns the component of `size` along this axis.
    #[inline]
    #[must_use]
    pub const fn main(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Returns the component of `size` across this axis.
    #[inline]
    #[must_use]
    pub const fn cross(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }

    /// Builds a size from main-axis and cross-axis extents.
    #[inline]
    #[must_use]
    pub const fn pack_size(self, main: f64, cross: f64) -> Size {
        match self {
            Self::Horizontal => Size::new(main, cross),
            Self::Vertical => Size::new(cross, main),
        }
    }

    /// Builds a rect from a main-axis span and a cross-axis span.
    #[inline]
    #[must_use]
    pub fn pack_rect(self, main0: f64, main1: f64, cross0: f64, cross1: f64) -> Rect {
        match self {
            Self::Horizontal => Rect::new(main0, cross0, main1, cross1),
            Self::Vertical => Rect::new(cross0, main0, cross1, main1),
        }
    }

    /// Returns the `(start, end)` span of `rect` along this axis.
    #[inline]
    #[must_use]
    pub const fn main_span(self, rect: Rect) -> (f64, f64) {
        match self {
            Self::Horizontal => (rect.x0, rect.x1),
            Self::Vertical => (rect.y0, rect.y1),
        }
    }
}

/// One of the nine standard box alignments.
///
/// Fold geometry only ever produces the four edge-center anchors; the corners
/// and [`Center`](Self::Center) exist so hosts can reuse the type for their
/// own alignment needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Top-left corner.
    TopLeft,
    /// Middle of the top edge.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Middle of the left edge.
    CenterLeft,
    /// Center of the box.
    Center,
    /// Middle of the right edge.
    CenterRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Middle of the bottom edge.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

impl Anchor {
    /// Returns the `(x, y)` fractions of this anchor within a box, each in
    /// `{0.0, 0.5, 1.0}`.
    #[must_use]
    pub const fn fractions(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (0.0, 0.0),
            Self::TopCenter => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::CenterLeft => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::CenterRight => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::BottomCenter => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }

    /// Resolves this anchor to a point inside `rect`.
    #[must_use]
    pub fn point_in(self, rect: Rect) -> Point {
        let (fx, fy) = self.fractions();
        Point::new(
            rect.x0 + rect.width() * fx,
            rect.y0 + rect.height() * fy,
        )
    }

    /// Places a box of `size` inside `outer` so that both share this anchor
    /// point.
    ///
    /// The box may overflow `outer`; that is how a full-extent panel is held
    /// against its hinge while its visible bounds shrink.
    #[must_use]
    pub fn align_within(self, outer: Rect, size: Size) -> Rect {
        let (fx, fy) = self.fractions();
        let x0 = outer.x0 + (outer.width() - size.width) * fx;
        let y0 = outer.y0 + (outer.height() - size.height) * fy;
        Rect::new(x0, y0, x0 + size.width, y0 + size.height)
    }
}

/// How the strip sizes itself along its axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisSize {
    /// The strip is exactly as long as the sum of its projected panel extents.
    #[default]
    ShrinkToFit,
    /// The strip takes all available space along its axis.
    FillAvailable,
}

/// Where the combined panel extent sits within the available space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisAlignment {
    /// Flush with the leading edge (top or left).
    #[default]
    Start,
    /// Centered.
    Center,
    /// Flush with the trailing edge (bottom or right).
    End,
}

impl AxisAlignment {
    /// Returns the leading offset for content of `extent` inside `available`.
    ///
    /// The offset is negative when content overflows and is not start-aligned.
    #[inline]
    #[must_use]
    pub fn offset(self, available: f64, extent: f64) -> f64 {
        let free = available - extent;
        match self {
            Self::Start => 0.0,
            Self::Center => free * 0.5,
            Self::End => free,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_and_cross_follow_axis() {
        let size = Size::new(320.0, 480.0);
        assert_eq!(FoldAxis::Vertical.main(size), 480.0);
        assert_eq!(FoldAxis::Vertical.cross(size), 320.0);
        assert_eq!(FoldAxis::Horizontal.main(size), 320.0);
        assert_eq!(FoldAxis::Horizontal.cross(size), 480.0);
        assert_eq!(FoldAxis::Horizontal.pack_size(10.0, 20.0), Size::new(10.0, 20.0));
        assert_eq!(FoldAxis::Vertical.pack_size(10.0, 20.0), Size::new(20.0, 10.0));
    }

    #[test]
    fn anchor_points() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(Anchor::BottomCenter.point_in(r), Point::new(50.0, 50.0));
        assert_eq!(Anchor::TopCenter.point_in(r), Point::new(50.0, 0.0));
        assert_eq!(Anchor::CenterRight.point_in(r), Point::new(100.0, 25.0));
        assert_eq!(Anchor::CenterLeft.point_in(r), Point::new(0.0, 25.0));
    }

    #[test]
    fn align_within_holds_the_hinge_edge() {
        // A 100-tall panel squeezed into 40 visible units, hinged at the bottom.
        let visible = Rect::new(0.0, 60.0, 200.0, 100.0);
        let full = Anchor::BottomCenter.align_within(visible, Size::new(200.0, 100.0));
        assert_eq!(full, Rect::new(0.0, 0.0, 200.0, 100.0));

        let full = Anchor::TopCenter.align_within(visible, Size::new(200.0, 100.0));
        assert_eq!(full, Rect::new(0.0, 60.0, 200.0, 160.0));
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(AxisAlignment::Start.offset(500.0, 300.0), 0.0);
        assert_eq!(AxisAlignment::Center.offset(500.0, 300.0), 100.0);
        assert_eq!(AxisAlignment::End.offset(500.0, 300.0), 200.0);
        assert_eq!(AxisAlignment::End.offset(100.0, 300.0), -200.0);
    }
}
