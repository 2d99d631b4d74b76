// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel content providers.
//!
//! The strip is agnostic to what a panel *is*: `V` is whatever the host uses
//! for a built visual (a widget handle, a display-list id, a string in
//! tests). Content is fetched per frame and only for mounted panels.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Where panel visuals come from.
pub enum ContentSource<V> {
    /// A fixed list of pre-built visuals, cloned into each frame.
    Static(Vec<V>),
    /// A generator invoked lazily with the panel index.
    Indexed {
        /// Number of panels.
        count: usize,
        /// Builds the visual for one panel.
        build: Box<dyn Fn(usize) -> V>,
    },
}

impl<V> ContentSource<V> {
    /// Creates an index-based source of `count` panels.
    #[must_use]
    pub fn indexed(count: usize, build: impl Fn(usize) -> V + 'static) -> Self {
        Self::Indexed {
            count,
            build: Box::new(build),
        }
    }

    /// Returns the number of panels.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Static(items) => items.len(),
            Self::Indexed { count, .. } => *count,
        }
    }

    /// Returns `true` if there are no panels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> ContentSource<V> {
    /// Produces the visual for panel `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<V> {
        match self {
            Self::Static(items) => items.get(index).cloned(),
            Self::Indexed { count, build } => (index < *count).then(|| build(index)),
        }
    }
}

impl<V> From<Vec<V>> for ContentSource<V> {
    fn from(items: Vec<V>) -> Self {
        Self::Static(items)
    }
}

impl<V> fmt::Debug for ContentSource<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(items) => f
                .debug_struct("Static")
                .field("len", &items.len())
                .finish_non_exhaustive(),
            Self::Indexed { count, .. } => f
                .debug_struct("Indexed")
                .field("count", count)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::Cell;

    #[test]
    fn static_source_clones_items() {
        let source = ContentSource::from(vec!["a", "b", "c"]);
        assert_eq!(source.len(), 3);
        assert_eq!(source.get(1), Some("b"));
        assert_eq!(source.get(3), None);
    }

    #[test]
    fn indexed_source_builds_lazily() {
        let calls = Rc::new(Cell::new(0_usize));
        let counter = Rc::clone(&calls);
        let source = ContentSource::indexed(4, move |i| {
            counter.set(counter.get() + 1);
            i * 10
        });
        assert_eq!(calls.get(), 0);
        assert_eq!(source.get(2), Some(20));
        assert_eq!(source.get(9), None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn empty_sources() {
        assert!(ContentSource::<u8>::Static(Vec::new()).is_empty());
        assert!(ContentSource::indexed(0, |i| i).is_empty());
    }
}
