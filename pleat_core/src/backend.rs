// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for presenting composed frames.
//!
//! The strip never touches a widget tree or a GPU. A host integration
//! provides the following pieces:
//!
//! - **Frame clock**: Produces [`FrameTick`] values (display link,
//!   `requestAnimationFrame`, a test loop) and a monotonic `now()` reading in
//!   [`HostTime`] ticks. Setup differs fundamentally across platforms, so it
//!   is not abstracted by a trait.
//!
//! - **Presenter**: Implements the [`Presenter`] trait to mirror a
//!   [`ComposedFrame`] into a native tree: position each panel at its
//!   `rect`, apply `projection.hinge_transform(axis)` about `anchor_point`,
//!   and paint the decorated visual clipped to the visible bounds.
//!
//! - **Hit testing**: Routes pointer input using
//!   [`ComposedFrame::panel_at`] or each panel's `interactive` flag.
//!
//! [`FrameTick`]: crate::timing::FrameTick
//! [`HostTime`]: crate::time::HostTime

use crate::layout::ComposedFrame;

/// Applies composed frames to a host presentation tree.
///
/// Widget-tree presenters, render-plan builders, and test doubles all
/// implement this trait.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(tick: FrameTick) {
///     // Animate, compose, and present in one call; phases are stamped with
///     // the host clock.
///     strip.present(&tick, parent_size, &mut presenter, &mut tracer, now);
///
///     // Or step by step:
///     strip.tick(&tick, &mut tracer);
///     let frame = strip.compose(parent_size);
///     presenter.apply(&frame);
/// }
/// ```
pub trait Presenter<V> {
    /// Mirrors `frame` into the backing presentation tree.
    fn apply(&mut self, frame: &ComposedFrame<V>);

    /// Releases everything the presenter created for the strip.
    fn teardown(&mut self) {}
}
