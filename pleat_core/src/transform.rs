// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal column-major 4×4 transform.
//!
//! This type covers the subset of projective transforms that fold geometry
//! needs (identity, perspective entry, rotation about X and Y, translation, scale,
//! multiply, and homogeneous point transformation) without pulling in a full
//! linear-algebra crate.

use core::ops::Mul;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// A column-major 4×4 transform stored as `[[f64; 4]; 4]`.
///
/// Each inner array is one *column* of the matrix, matching the memory layout
/// used by GPU APIs and Core Animation's `CATransform3D`. The entry at row
/// `r`, column `c` is `cols[c][r]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3d {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f64; 4]; 4],
}

impl Transform3d {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Returns the entry at `row`, `col` (both 0-based).
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= 4`.
    #[inline]
    #[must_use]
    pub const fn entry(&self, row: usize, col: usize) -> f64 {
        self.cols[col][row]
    }

    /// Returns a copy with the entry at `row`, `col` replaced.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= 4`.
    #[inline]
    #[must_use]
    pub const fn with_entry(mut self, row: usize, col: usize, value: f64) -> Self {
        self.cols[col][row] = value;
        self
    }

    /// Creates a perspective transform: the identity with entry `(3, 2)` set
    /// to `strength`, so that `w' = w + strength * z`.
    ///
    /// Small positive strengths (around `0.001`) give a gentle depth effect.
    #[inline]
    #[must_use]
    pub const fn from_perspective(strength: f64) -> Self {
        Self::IDENTITY.with_entry(3, 2, strength)
    }

    /// Creates a pure translation transform.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Creates a non-uniform scale. Negative factors mirror.
    #[inline]
    #[must_use]
    pub const fn from_scale(x: f64, y: f64, z: f64) -> Self {
        Self {
            cols: [
                [x, 0.0, 0.0, 0.0],
                [0.0, y, 0.0, 0.0],
                [0.0, 0.0, z, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates a rotation around the X axis (radians).
    ///
    /// Positive angles carry `+y` toward `+z`.
    #[inline]
    #[must_use]
    pub fn from_rotation_x(radians: f64) -> Self {
        let (s, c) = sin_cos(radians);
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, s, 0.0],
                [0.0, -s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates a rotation around the Y axis (radians).
    ///
    /// Positive angles carry `+z` toward `+x`.
    #[inline]
    #[must_use]
    pub fn from_rotation_y(radians: f64) -> Self {
        let (s, c) = sin_cos(radians);
        Self {
            cols: [
                [c, 0.0, -s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Transforms a homogeneous point `[x, y, z, w]`.
    ///
    /// No perspective divide is performed; callers divide by the returned `w`
    /// when they need projected coordinates.
    #[inline]
    #[must_use]
    pub fn transform_point(&self, p: [f64; 4]) -> [f64; 4] {
        let c = &self.cols;
        let mut out = [0.0_f64; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = c[0][row] * p[0] + c[1][row] * p[1] + c[2][row] * p[2] + c[3][row] * p[3];
        }
        out
    }

    /// Converts to a flat column-major `f32` array, as consumed by GPU
    /// uniform buffers and platform compositors.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "f32 precision is what presentation APIs accept"
    )]
    pub fn to_cols_f32(&self) -> [f32; 16] {
        let mut out = [0.0_f32; 16];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.cols[i / 4][i % 4] as f32;
        }
        out
    }

    /// Is this transform [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }
}

#[inline]
fn sin_cos(radians: f64) -> (f64, f64) {
    #[cfg(feature = "std")]
    let (s, c) = radians.sin_cos();
    #[cfg(not(feature = "std"))]
    let (s, c) = (radians.sin(), radians.cos());
    (s, c)
}

impl Default for Transform3d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform3d {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 4]; 4];
        let mut j = 0;
        while j < 4 {
            let mut i = 0;
            while i < 4 {
                out[j][i] =
                    a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
                i += 1;
            }
            j += 1;
        }
        Self { cols: out }
    }
}
