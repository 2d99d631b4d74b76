// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry, layout, and animation core for accordion fold strips.
//!
//! A fold strip is a row (or column) of equally sized panels, each rotated
//! in perspective about a hinge so the whole strip collapses from fully
//! expanded (`unfold = 1`) to fully collapsed (`unfold = 0`). Adjacent
//! panels fold in opposite directions, giving the familiar paper-accordion
//! look. `pleat_core` is `no_std` compatible (with `alloc`) and knows nothing
//! about the host's widget tree or renderer.
//!
//! # Architecture
//!
//! ```text
//!   Host clock
//!       │ FrameTick
//!       ▼
//!   FoldAnimator::tick() ──► unfold ──► layout::compose()
//!                                           │  per panel: fold::project()
//!                                           │             Decoration::apply()
//!                                           ▼
//!                                     ComposedFrame ──► Presenter::apply()
//! ```
//!
//! **[`fold`]**: The pure per-panel geometry engine: fold angle, 4×4
//! perspective transform, projected extent, and hinge anchor.
//!
//! **[`layout`]**: Places projected panels back to back, aligns the strip in
//! its parent, gates interaction, and applies decoration.
//!
//! **[`animation`]**: Easing curves, tweens, and the [`FoldAnimator`]
//! state machine that owns the unfold value.
//!
//! **[`strip`]**: The [`FoldStrip`] component tying configuration, content,
//! decoration, and animation together.
//!
//! **[`content`]** and **[`decoration`]**: Panel content providers and the
//! default fold shading (overlays and gradient creases).
//!
//! **[`config`]**: [`FoldConfig`] and its validation errors.
//!
//! **[`axis`]**, **[`transform`]**, **[`time`]**, **[`timing`]**: Axis and
//! anchor vocabulary, the column-major [`Transform3d`](transform::Transform3d),
//! and host-tick time arithmetic.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) trait hosts
//! implement to mirror composed frames.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! frame instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-panel
//!   geometry events.
//!
//! [`FoldAnimator`]: animation::FoldAnimator
//! [`FoldStrip`]: strip::FoldStrip
//! [`FoldConfig`]: config::FoldConfig

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animation;
pub mod axis;
pub mod backend;
pub mod config;
pub mod content;
pub mod decoration;
pub mod fold;
pub mod layout;
pub mod strip;
pub mod time;
pub mod timing;
pub mod trace;
pub mod transform;
