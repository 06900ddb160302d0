// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trackpad and wheel gestures that navigate a view: zoom, rotate, scroll.

use core::fmt::Debug;

use understory_quasimode::catalog::{RESET_VIEW, ROTATE_VIEW, SCROLL_VIEW, ZOOM};
use understory_quasimode::{Action, EventMap, Eventable};

use crate::manager::{ActionManager, deliver, frame, one_shot};
use crate::receiver::Capability;
use crate::view::{GestureTarget, ViewTree};

/// Pinch zooming and view reset.
#[derive(Clone, Debug)]
pub struct ZoomableActionManager<K> {
    target: GestureTarget<K>,
}

impl<K> Default for ZoomableActionManager<K> {
    fn default() -> Self {
        Self {
            target: GestureTarget::default(),
        }
    }
}

impl<K: Copy + Eq + Debug> ZoomableActionManager<K> {
    /// Create an idle manager.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: ViewTree> ActionManager<T> for ZoomableActionManager<T::Key> {
    fn actions(&self) -> &'static [Action] {
        const ACTIONS: &[Action] = &[ZOOM, RESET_VIEW];
        ACTIONS
    }

    fn send(&mut self, events: &EventMap, tree: &mut T) {
        one_shot(events, &RESET_VIEW, tree, Capability::Zoomable, |r, p| {
            if let Some(z) = r.as_zoomable() {
                z.reset_view(p);
            }
        });

        let Some(frame) = frame(events, &ZOOM) else {
            return;
        };
        let Eventable::Pinch(pinch) = frame.device else {
            return;
        };
        let at = frame.at();
        if let Some(key) = self.target.track(tree, frame.phase, at, Capability::Zoomable) {
            deliver(tree, key, at, |r, p| {
                if let Some(z) = r.as_zoomable() {
                    z.zoom(p, pinch.time, pinch.magnification, frame.phase);
                }
            });
        }
    }
}

/// Two-finger view rotation.
#[derive(Clone, Debug)]
pub struct RotatableActionManager<K> {
    target: GestureTarget<K>,
}

impl<K> Default for RotatableActionManager<K> {
    fn default() -> Self {
        Self {
            target: GestureTarget::default(),
        }
    }
}

impl<K: Copy + Eq + Debug> RotatableActionManager<K> {
    /// Create an idle manager.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: ViewTree> ActionManager<T> for RotatableActionManager<T::Key> {
    fn actions(&self) -> &'static [Action] {
        const ACTIONS: &[Action] = &[ROTATE_VIEW];
        ACTIONS
    }

    fn send(&mut self, events: &EventMap, tree: &mut T) {
        let Some(frame) = frame(events, &ROTATE_VIEW) else {
            return;
        };
        let Eventable::Rotate(rotate) = frame.device else {
            return;
        };
        let at = frame.at();
        if let Some(key) = self.target.track(tree, frame.phase, at, Capability::Rotatable) {
            deliver(tree, key, at, |r, p| {
                if let Some(v) = r.as_rotatable() {
                    v.rotate(p, rotate.time, rotate.rotation, frame.phase);
                }
            });
        }
    }
}

/// Wheel and trackpad scrolling.
///
/// The target is fixed for the whole scroll, including its momentum tail.
#[derive(Clone, Debug)]
pub struct ScrollableActionManager<K> {
    target: GestureTarget<K>,
}

impl<K> Default for ScrollableActionManager<K> {
    fn default() -> Self {
        Self {
            target: GestureTarget::default(),
        }
    }
}

impl<K: Copy + Eq + Debug> ScrollableActionManager<K> {
    /// Create an idle manager.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: ViewTree> ActionManager<T> for ScrollableActionManager<T::Key> {
    fn actions(&self) -> &'static [Action] {
        const ACTIONS: &[Action] = &[SCROLL_VIEW];
        ACTIONS
    }

    fn send(&mut self, events: &EventMap, tree: &mut T) {
        let Some(frame) = frame(events, &SCROLL_VIEW) else {
            return;
        };
        let Eventable::Scroll(scroll) = frame.device else {
            return;
        };
        let at = frame.at();
        if let Some(key) = self.target.track(tree, frame.phase, at, Capability::Scrollable) {
            deliver(tree, key, at, |r, p| {
                if let Some(s) = r.as_scrollable() {
                    s.scroll(p, scroll.time, scroll.delta, frame.phase, scroll.momentum_phase);
                }
            });
        }
    }
}
