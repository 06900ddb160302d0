// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The view hierarchy seam and gesture target tracking.

use core::fmt::Debug;

use kurbo::{Point, Rect};
use understory_quasimode::Phase;

use crate::receiver::{Capability, Receiver};

/// The view hierarchy that action managers hit-test and deliver into.
///
/// Keys are non-owning handles: a key may outlive its view, and
/// [`ViewTree::is_alive`] tells the two apart.
pub trait ViewTree {
    /// Handle of a view.
    type Key: Copy + Eq + Debug + 'static;

    /// Front-most view under the root-space point `at` offering `capability`.
    fn locate(&self, at: Point, capability: Capability) -> Option<Self::Key>;

    /// Whether `key` still refers to a view.
    fn is_alive(&self, key: Self::Key) -> bool;

    /// Convert a root-space point into the local space of `key`.
    fn convert_from_root(&self, key: Self::Key, point: Point) -> Option<Point>;

    /// Convert a root-space rectangle into the local space of `key`.
    ///
    /// The default converts two corners, which is exact for translations and
    /// scales.
    fn convert_rect_from_root(&self, key: Self::Key, rect: Rect) -> Option<Rect> {
        let p0 = self.convert_from_root(key, Point::new(rect.x0, rect.y0))?;
        let p1 = self.convert_from_root(key, Point::new(rect.x1, rect.y1))?;
        Some(Rect::from_points(p0, p1))
    }

    /// The receiver behind `key`, if the view has one.
    fn receiver_mut(&mut self, key: Self::Key) -> Option<&mut dyn Receiver>;

    /// Insert a non-interactive overlay with a root-space `frame` above every view.
    fn insert_overlay(&mut self, frame: Rect) -> Self::Key;

    /// Move or resize an overlay.
    fn set_overlay_frame(&mut self, overlay: Self::Key, frame: Rect);

    /// Remove an overlay.
    fn remove_overlay(&mut self, overlay: Self::Key);
}

/// The receiver of one gesture, fixed when the gesture begins.
///
/// ```
/// use understory_action::GestureTarget;
///
/// let mut target = GestureTarget::<u32>::new();
/// assert!(!target.is_active());
/// assert_eq!(target.end(), None);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GestureTarget<K> {
    key: Option<K>,
}

impl<K> Default for GestureTarget<K> {
    fn default() -> Self {
        Self { key: None }
    }
}

impl<K: Copy + Eq + Debug> GestureTarget<K> {
    /// Create an idle target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.key.is_some()
    }

    /// Hit-test for a new gesture and remember the result.
    ///
    /// A miss leaves the target idle for the rest of the gesture.
    pub fn begin<T>(&mut self, tree: &T, at: Point, capability: Capability) -> Option<K>
    where
        T: ViewTree<Key = K>,
    {
        self.key = tree.locate(at, capability);
        if self.key.is_none() {
            tracing::trace!(?capability, x = at.x, y = at.y, "no receiver under pointer");
        }
        self.key
    }

    /// The target of the gesture in progress.
    ///
    /// A target whose view was removed mid-gesture drops the gesture.
    pub fn current<T>(&mut self, tree: &T) -> Option<K>
    where
        T: ViewTree<Key = K>,
    {
        let key = self.key?;
        if tree.is_alive(key) {
            Some(key)
        } else {
            tracing::debug!(?key, "gesture target removed mid-gesture");
            self.key = None;
            None
        }
    }

    /// Finish the gesture, returning the target it had.
    pub fn end(&mut self) -> Option<K> {
        self.key.take()
    }

    /// Advance the gesture by one composite phase.
    ///
    /// `Began` hit-tests at `at`, `Changed` reuses the stored target, and
    /// `Ended` yields the stored target one last time and then clears it.
    pub fn track<T>(&mut self, tree: &T, phase: Phase, at: Point, capability: Capability) -> Option<K>
    where
        T: ViewTree<Key = K>,
    {
        match phase {
            Phase::Began => self.begin(tree, at, capability),
            Phase::Changed => self.current(tree),
            Phase::Ended => {
                let key = self.current(tree);
                self.key = None;
                key
            }
        }
    }
}
