// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

use kurbo::{Point, Rect};
use understory_quasimode::catalog::{DESELECT, DESELECT_ALL, SELECT, SELECT_ALL};
use understory_quasimode::{Action, EventMap, Phase};

use crate::manager::{ActionManager, one_shot};
use crate::receiver::Capability;
use crate::view::{GestureTarget, ViewTree};

const ACTIONS: &[Action] = &[SELECT, SELECT_ALL, DESELECT, DESELECT_ALL];
const MARQUEE: [Action; 2] = [SELECT, DESELECT];

/// Whether the marquee adds to or removes from the selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectMode {
    /// Add to the selection.
    #[default]
    Select,
    /// Remove from the selection.
    Deselect,
}

/// Rubber-band selection with a marquee overlay, plus select all and deselect all.
///
/// `select` and `deselect` share the drag trigger; the arbitration main decides
/// the mode. Pressing the extra modifier mid-drag switches the running marquee
/// to deselect instead of starting a new one. The marquee overlay is shown
/// from the drag origin even when no selectable view is under it.
#[derive(Clone, Debug)]
pub struct SelectableActionManager<K> {
    target: GestureTarget<K>,
    overlay: Option<K>,
    origin: Point,
    mode: SelectMode,
}

impl<K> Default for SelectableActionManager<K> {
    fn default() -> Self {
        Self {
            target: GestureTarget::default(),
            overlay: None,
            origin: Point::ORIGIN,
            mode: SelectMode::Select,
        }
    }
}

impl<K: Copy + Eq + Debug> SelectableActionManager<K> {
    /// Create an idle manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mode of the running marquee, if any.
    pub fn active_mode(&self) -> Option<SelectMode> {
        self.overlay.is_some().then_some(self.mode)
    }

    fn update<T>(&mut self, tree: &mut T, at: Point, phase: Phase)
    where
        T: ViewTree<Key = K>,
    {
        let frame = Rect::from_points(self.origin, at);
        if let Some(overlay) = self.overlay {
            tree.set_overlay_frame(overlay, frame);
        }
        let Some(key) = self.target.current(tree) else {
            return;
        };
        let Some(local) = tree.convert_rect_from_root(key, frame) else {
            return;
        };
        let mode = self.mode;
        if let Some(selectable) = tree.receiver_mut(key).and_then(|r| r.as_selectable()) {
            match mode {
                SelectMode::Select => selectable.select(local, phase),
                SelectMode::Deselect => selectable.deselect(local, phase),
            }
        }
    }

    fn finish<T>(&mut self, tree: &mut T)
    where
        T: ViewTree<Key = K>,
    {
        self.target.end();
        if let Some(overlay) = self.overlay.take() {
            tree.remove_overlay(overlay);
        }
    }
}

impl<T: ViewTree> ActionManager<T> for SelectableActionManager<T::Key> {
    fn actions(&self) -> &'static [Action] {
        ACTIONS
    }

    fn send(&mut self, events: &EventMap, tree: &mut T) {
        one_shot(events, &SELECT_ALL, tree, Capability::Selectable, |r, _| {
            if let Some(s) = r.as_selectable() {
                s.select_all();
            }
        });
        one_shot(events, &DESELECT_ALL, tree, Capability::Selectable, |r, _| {
            if let Some(s) = r.as_selectable() {
                s.deselect_all();
            }
        });

        let Some(tuple) = events.sendable_action_event_tuple(&MARQUEE) else {
            return;
        };
        let main = tuple.main;
        let Some(device) = events.device_event(&main.action).copied() else {
            return;
        };
        let at = device.root_location();
        let mode = if main.action == DESELECT {
            SelectMode::Deselect
        } else {
            SelectMode::Select
        };

        let fresh = main.is_sendable(device.phase());
        match main.phase {
            // A modifier joined a running drag.
            Phase::Began if !fresh && self.overlay.is_some() => {
                tracing::debug!(?mode, "marquee mode switched mid-drag");
                self.mode = mode;
                self.update(tree, at, Phase::Changed);
            }
            Phase::Began if !fresh => {}
            Phase::Began => {
                self.finish(tree);
                self.mode = mode;
                self.origin = at;
                self.overlay = Some(tree.insert_overlay(Rect::from_points(at, at)));
                self.target.begin(tree, at, Capability::Selectable);
                self.update(tree, at, Phase::Began);
            }
            Phase::Changed => self.update(tree, at, Phase::Changed),
            Phase::Ended => {
                self.update(tree, at, Phase::Ended);
                self.finish(tree);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeTree, Harness};
    use alloc::vec;
    use understory_quasimode::types::{A, COMMAND, DRAG, SHIFT};

    fn canvas() -> FakeTree {
        let mut tree = FakeTree::new();
        tree.add(
            "canvas",
            Rect::new(100.0, 100.0, 500.0, 500.0),
            &[Capability::Selectable],
        );
        tree
    }

    #[test]
    fn marquee_follows_the_drag() {
        let mut h = Harness::new(SelectableActionManager::new(), canvas());
        h.key(COMMAND, Phase::Began, Point::new(110.0, 120.0));
        h.drag(DRAG, Phase::Began, Point::new(110.0, 120.0));
        assert_eq!(h.tree.overlays(), vec![Rect::new(110.0, 120.0, 110.0, 120.0)]);
        assert_eq!(h.manager.active_mode(), Some(SelectMode::Select));

        h.drag(DRAG, Phase::Changed, Point::new(150.0, 160.0));
        assert_eq!(h.tree.overlays(), vec![Rect::new(110.0, 120.0, 150.0, 160.0)]);

        // Dragging up and to the left normalizes the rectangle.
        h.drag(DRAG, Phase::Ended, Point::new(105.0, 110.0));
        assert!(h.tree.overlays().is_empty());
        assert_eq!(h.manager.active_mode(), None);
        assert_eq!(
            h.calls(),
            vec![
                ("canvas", Call::Select(Rect::new(10.0, 20.0, 10.0, 20.0), Phase::Began)),
                ("canvas", Call::Select(Rect::new(10.0, 20.0, 50.0, 60.0), Phase::Changed)),
                ("canvas", Call::Select(Rect::new(5.0, 10.0, 10.0, 20.0), Phase::Ended)),
            ]
        );
    }

    #[test]
    fn shift_mid_drag_switches_to_deselect() {
        let mut h = Harness::new(SelectableActionManager::new(), canvas());
        h.key(COMMAND, Phase::Began, Point::new(110.0, 120.0));
        h.drag(DRAG, Phase::Began, Point::new(110.0, 120.0));
        h.drag(DRAG, Phase::Changed, Point::new(150.0, 160.0));
        h.key(SHIFT, Phase::Began, Point::new(150.0, 160.0));
        assert_eq!(h.manager.active_mode(), Some(SelectMode::Deselect));
        assert_eq!(h.tree.overlays().len(), 1, "the marquee survives the switch");
        h.drag(DRAG, Phase::Changed, Point::new(200.0, 200.0));
        h.drag(DRAG, Phase::Ended, Point::new(200.0, 200.0));

        let calls = h.calls();
        assert_eq!(
            calls[2..],
            [
                ("canvas", Call::Deselect(Rect::new(10.0, 20.0, 50.0, 60.0), Phase::Changed)),
                ("canvas", Call::Deselect(Rect::new(10.0, 20.0, 100.0, 100.0), Phase::Changed)),
                ("canvas", Call::Deselect(Rect::new(10.0, 20.0, 100.0, 100.0), Phase::Ended)),
            ]
        );
        assert!(h.tree.overlays().is_empty());
    }

    #[test]
    fn releasing_shift_ends_the_gesture() {
        let mut h = Harness::new(SelectableActionManager::new(), canvas());
        h.key(COMMAND, Phase::Began, Point::new(110.0, 120.0));
        h.drag(DRAG, Phase::Began, Point::new(110.0, 120.0));
        h.key(SHIFT, Phase::Began, Point::new(110.0, 120.0));
        h.drag(DRAG, Phase::Changed, Point::new(130.0, 130.0));
        h.key(SHIFT, Phase::Ended, Point::new(130.0, 130.0));
        assert!(h.tree.overlays().is_empty());
        let _ = h.calls();

        // Plain select is live again, but it never began with the drag.
        h.drag(DRAG, Phase::Changed, Point::new(140.0, 140.0));
        h.drag(DRAG, Phase::Ended, Point::new(140.0, 140.0));
        assert!(h.calls().is_empty());
        assert!(h.tree.overlays().is_empty());
    }

    #[test]
    fn miss_shows_the_marquee_but_selects_nothing() {
        let mut h = Harness::new(SelectableActionManager::new(), canvas());
        h.key(COMMAND, Phase::Began, Point::ORIGIN);
        h.drag(DRAG, Phase::Began, Point::new(10.0, 10.0));
        assert_eq!(h.tree.overlays(), vec![Rect::new(10.0, 10.0, 10.0, 10.0)]);
        assert_eq!(h.manager.active_mode(), Some(SelectMode::Select));
        h.drag(DRAG, Phase::Changed, Point::new(200.0, 200.0));
        assert_eq!(h.tree.overlays(), vec![Rect::new(10.0, 10.0, 200.0, 200.0)]);
        h.drag(DRAG, Phase::Ended, Point::new(300.0, 300.0));
        assert!(h.calls().is_empty());
        assert!(h.tree.overlays().is_empty());
        assert_eq!(h.manager.active_mode(), None);
    }

    #[test]
    fn select_all_and_deselect_all() {
        let mut h = Harness::new(SelectableActionManager::new(), canvas());
        let at = Point::new(200.0, 200.0);
        h.key(COMMAND, Phase::Began, at);
        h.tap(A, at);
        h.key(SHIFT, Phase::Began, at);
        h.tap(A, at);
        assert_eq!(
            h.calls(),
            vec![("canvas", Call::SelectAll), ("canvas", Call::DeselectAll)]
        );
    }
}
