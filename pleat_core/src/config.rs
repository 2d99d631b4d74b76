// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strip configuration and validation.

use core::fmt;

use crate::animation::AnimationSpec;
use crate::axis::{AxisAlignment, AxisSize, FoldAxis};

/// Errors raised when a strip is constructed or reconfigured with invalid
/// options.
///
/// These are the only failures the core reports. Cancelled animations and
/// transiently out-of-range animation values are handled internally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `item_extent` was zero, negative, or not finite.
    NonPositiveItemExtent(f64),
    /// `target_unfold` was outside `[0, 1]`.
    TargetUnfoldOutOfRange(f64),
    /// `interaction_unfold_threshold` was outside `[0, 1]`.
    ThresholdOutOfRange(f64),
    /// `perspective` was zero, negative, or not finite.
    InvalidPerspective(f64),
    /// A crease extent fraction was outside `[0, 1]`.
    CreaseExtentOutOfRange(f64),
    /// The content source has no panels.
    EmptyContent,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveItemExtent(v) => {
                write!(f, "item extent must be positive and finite (got {v})")
            }
            Self::TargetUnfoldOutOfRange(v) => {
                write!(f, "target unfold must be within [0, 1] (got {v})")
            }
            Self::ThresholdOutOfRange(v) => {
                write!(
                    f,
                    "interaction unfold threshold must be within [0, 1] (got {v})"
                )
            }
            Self::InvalidPerspective(v) => {
                write!(f, "perspective must be positive and finite (got {v})")
            }
            Self::CreaseExtentOutOfRange(v) => {
                write!(f, "crease extent must be within [0, 1] (got {v})")
            }
            Self::EmptyContent => f.write_str("content source has no panels"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Checks that `v` is a finite value in `[0, 1]`.
#[inline]
pub(crate) fn is_unit(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

/// Options controlling geometry, layout, animation, and interaction of a
/// fold strip.
///
/// Construct with [`FoldConfig::new`] and adjust with the `with_*` builders;
/// call [`validate`](Self::validate) (or let
/// [`FoldStrip::new`](crate::strip::FoldStrip::new) do it) before use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoldConfig {
    /// Fixed size of every panel along the fold axis. Must be positive.
    pub item_extent: f64,
    /// Unfold value the strip animates toward, in `[0, 1]`.
    pub target_unfold: f64,
    /// Axis the panels stack along.
    pub axis: FoldAxis,
    /// Whether the strip shrinks to its content or fills its parent.
    pub axis_size: AxisSize,
    /// Placement of the combined panel extent within the parent.
    pub axis_alignment: AxisAlignment,
    /// Timing of transitions to a new target.
    pub animation: AnimationSpec,
    /// Entry `(3, 2)` of the perspective matrix. Small and positive.
    pub perspective: f64,
    /// Fold direction of the first panel; later panels alternate.
    pub first_child_folds_inward: bool,
    /// Skip mounting panels entirely while the strip is fully folded.
    pub unmount_on_fold: bool,
    /// Panels ignore pointer input while unfold is below this value.
    /// `None` keeps them interactive at every unfold value.
    pub interaction_unfold_threshold: Option<f64>,
}

impl FoldConfig {
    /// Default perspective strength.
    pub const DEFAULT_PERSPECTIVE: f64 = 0.001;

    /// Creates a configuration with the given panel extent and defaults for
    /// everything else: fully unfolded, vertical, shrink-to-fit,
    /// start-aligned, 250 ms ease-in-out, first panel folding inward.
    #[must_use]
    pub const fn new(item_extent: f64) -> Self {
        Self {
            item_extent,
            target_unfold: 1.0,
            axis: FoldAxis::Vertical,
            axis_size: AxisSize::ShrinkToFit,
            axis_alignment: AxisAlignment::Start,
            animation: AnimationSpec::DEFAULT,
            perspective: Self::DEFAULT_PERSPECTIVE,
            first_child_folds_inward: true,
            unmount_on_fold: false,
            interaction_unfold_threshold: None,
        }
    }

    /// Sets the target unfold value.
    #[must_use]
    pub const fn with_target_unfold(mut self, target_unfold: f64) -> Self {
        self.target_unfold = target_unfold;
        self
    }

    /// Sets the fold axis.
    #[must_use]
    pub const fn with_axis(mut self, axis: FoldAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Sets the strip sizing policy.
    #[must_use]
    pub const fn with_axis_size(mut self, axis_size: AxisSize) -> Self {
        self.axis_size = axis_size;
        self
    }

    /// Sets the strip alignment.
    #[must_use]
    pub const fn with_axis_alignment(mut self, axis_alignment: AxisAlignment) -> Self {
        self.axis_alignment = axis_alignment;
        self
    }

    /// Sets the transition timing.
    #[must_use]
    pub const fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }

    /// Sets the perspective strength.
    #[must_use]
    pub const fn with_perspective(mut self, perspective: f64) -> Self {
        self.perspective = perspective;
        self
    }

    /// Sets the fold direction of the first panel.
    #[must_use]
    pub const fn with_first_child_folds_inward(mut self, inward: bool) -> Self {
        self.first_child_folds_inward = inward;
        self
    }

    /// Enables or disables unmounting panels while fully folded.
    #[must_use]
    pub const fn with_unmount_on_fold(mut self, unmount_on_fold: bool) -> Self {
        self.unmount_on_fold = unmount_on_fold;
        self
    }

    /// Sets the interaction cutoff.
    #[must_use]
    pub const fn with_interaction_unfold_threshold(mut self, threshold: Option<f64>) -> Self {
        self.interaction_unfold_threshold = threshold;
        self
    }

    /// Checks every option, returning the first violation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the offending option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.item_extent.is_finite() && self.item_extent > 0.0) {
            return Err(ConfigError::NonPositiveItemExtent(self.item_extent));
        }
        if !is_unit(self.target_unfold) {
            return Err(ConfigError::TargetUnfoldOutOfRange(self.target_unfold));
        }
        if let Some(threshold) = self.interaction_unfold_threshold {
            if !is_unit(threshold) {
                return Err(ConfigError::ThresholdOutOfRange(threshold));
            }
        }
        if !(self.perspective.is_finite() && self.perspective > 0.0) {
            return Err(ConfigError::InvalidPerspective(self.perspective));
        }
        Ok(())
    }

    /// Returns whether panels accept pointer input at `unfold`.
    #[inline]
    #[must_use]
    pub fn is_interactive(&self, unfold: f64) -> bool {
        self.interaction_unfold_threshold
            .is_none_or(|threshold| unfold >= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn defaults_validate() {
        let config = FoldConfig::new(100.0);
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.target_unfold, 1.0);
        assert_eq!(config.perspective, 0.001);
        assert!(config.first_child_folds_inward);
        assert!(!config.unmount_on_fold);
        assert_eq!(config.interaction_unfold_threshold, None);
    }

    #[test]
    fn rejects_bad_item_extent() {
        for extent in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = FoldConfig::new(extent).validate().unwrap_err();
            assert!(matches!(err, ConfigError::NonPositiveItemExtent(_)), "{extent}");
        }
    }

    #[test]
    fn rejects_out_of_range_unit_values() {
        let base = FoldConfig::new(100.0);
        assert_eq!(
            base.with_target_unfold(1.5).validate(),
            Err(ConfigError::TargetUnfoldOutOfRange(1.5))
        );
        assert_eq!(
            base.with_interaction_unfold_threshold(Some(-0.1)).validate(),
            Err(ConfigError::ThresholdOutOfRange(-0.1))
        );
        assert!(base.with_target_unfold(f64::NAN).validate().is_err());
    }

    #[test]
    fn rejects_bad_perspective() {
        let err = FoldConfig::new(100.0).with_perspective(0.0).validate();
        assert_eq!(err, Err(ConfigError::InvalidPerspective(0.0)));
    }

    #[test]
    fn interaction_threshold() {
        let always = FoldConfig::new(10.0);
        assert!(always.is_interactive(0.0));

        let only_open = FoldConfig::new(10.0).with_interaction_unfold_threshold(Some(1.0));
        assert!(!only_open.is_interactive(0.999));
        assert!(only_open.is_interactive(1.0));
    }

    #[test]
    fn errors_display() {
        let msg = ConfigError::NonPositiveItemExtent(-1.0).to_string();
        assert!(msg.contains("item extent"), "got: {msg}");
        assert_eq!(ConfigError::EmptyContent.to_string(), "content source has no panels");
    }
}
