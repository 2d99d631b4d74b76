// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-plan lowering and damage tracking for pleat fold strips.
//!
//! This crate provides the intermediate representation between
//! [`pleat_core`]'s composed frames and backend-specific rendering. It
//! defines:
//!
//! - [`RenderItem`]: a single draw command: content, world transform,
//!   clip, opacity, and decoration layers
//! - [`RenderPlan`]: an ordered list of draw commands for one frame; it also
//!   implements [`Presenter`](pleat_core::backend::Presenter)
//! - [`DamageRegion`]: spatial damage tracking for partial re-rendering
//! - [`world_transform`]: the panel-local to parent transform of a panel

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod damage;
mod plan;

pub use damage::DamageRegion;
pub use plan::{BlendMode, RenderItem, RenderPlan, world_transform};
