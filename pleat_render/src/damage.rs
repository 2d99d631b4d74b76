// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial damage tracking for partial re-rendering.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::plan::{RenderItem, RenderPlan};

/// A region of the parent that needs re-rendering.
///
/// Backends can use this to minimize GPU work by only redrawing areas
/// that changed since the last frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DamageRegion {
    /// The entire output needs redrawing.
    #[default]
    Full,
    /// A list of axis-aligned rectangles that need redrawing, in parent
    /// coordinates.
    Rects(Vec<Rect>),
    /// Nothing changed; the previous frame can be reused.
    None,
}

impl DamageRegion {
    /// Returns `true` if no region needs redrawing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Merges another damage region into this one.
    pub fn merge(&mut self, other: &Self) {
        match (&*self, other) {
            (Self::Full, _) | (_, Self::Full) => *self = Self::Full,
            (Self::None, _) => *self = other.clone(),
            (_, Self::None) => {}
            (Self::Rects(a), Self::Rects(b)) => {
                let mut merged = a.clone();
                merged.extend_from_slice(b);
                *self = Self::Rects(merged);
            }
        }
    }

    /// Returns the union of all damaged rects, or `None` for
    /// [`Full`](Self::Full) and [`None`](Self::None).
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rects(rects) => rects.iter().copied().reduce(|a, b| a.union(b)),
            Self::Full | Self::None => None,
        }
    }

    /// Diffs two plans of the same strip panel by panel.
    ///
    /// A panel whose geometry, opacity, layers, or content changed damages
    /// both its previous and its new visible bounds. Panels present in only
    /// one plan damage their bounds in that plan. Zero-area bounds are
    /// skipped.
    #[must_use]
    pub fn between<V: PartialEq>(prev: &RenderPlan<V>, next: &RenderPlan<V>) -> Self {
        let mut rects = Vec::new();
        let mut push = |r: Rect| {
            if r.area() > 0.0 {
                rects.push(r);
            }
        };

        for item in &next.items {
            match find(prev, item.panel_index) {
                Some(old) if old == item => {}
                Some(old) => {
                    push(old.bounds);
                    push(item.bounds);
                }
                None => push(item.bounds),
            }
        }
        for old in &prev.items {
            if find(next, old.panel_index).is_none() {
                push(old.bounds);
            }
        }

        if rects.is_empty() {
            Self::None
        } else {
            Self::Rects(rects)
        }
    }
}

fn find<V>(plan: &RenderPlan<V>, panel_index: usize) -> Option<&RenderItem<V>> {
    plan.items.iter().find(|item| item.panel_index == panel_index)
}
