// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

use understory_quasimode::catalog::{
    MOVE, MOVE_Z, MOVE_Z_MODE, TRANSFORM, TRANSFORM_MODE, WARP, WARP_MODE,
};
use understory_quasimode::{Action, EventMap};

use crate::manager::{ActionManager, ModeDisplay, gesture};
use crate::receiver::{Capability, DisplayMode};
use crate::view::{GestureTarget, ViewTree};

const ACTIONS: &[Action] = &[
    MOVE,
    TRANSFORM_MODE,
    TRANSFORM,
    WARP_MODE,
    WARP,
    MOVE_Z_MODE,
    MOVE_Z,
];

const MODES: &[(Action, DisplayMode)] = &[
    (TRANSFORM_MODE, DisplayMode::Transform),
    (WARP_MODE, DisplayMode::Warp),
    (MOVE_Z_MODE, DisplayMode::MoveZ),
];

/// Drag gestures on objects: move, transform, warp and stacking order.
///
/// The modifiers held when the drag begins pick the gesture. Each gesture
/// keeps its own target, so a modifier change mid-drag ends the running
/// gesture without starting another until the next drag. While only the
/// modifiers of a transform gesture are held, the object under the pointer
/// shows the matching handles.
#[derive(Clone, Debug)]
pub struct TransformableActionManager<K> {
    display: ModeDisplay<K>,
    moving: GestureTarget<K>,
    transforming: GestureTarget<K>,
    warping: GestureTarget<K>,
    moving_z: GestureTarget<K>,
}

impl<K> Default for TransformableActionManager<K> {
    fn default() -> Self {
        Self {
            display: ModeDisplay::default(),
            moving: GestureTarget::default(),
            transforming: GestureTarget::default(),
            warping: GestureTarget::default(),
            moving_z: GestureTarget::default(),
        }
    }
}

impl<K: Copy + Eq + Debug> TransformableActionManager<K> {
    /// Create an idle manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any drag gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.moving.is_active()
            || self.transforming.is_active()
            || self.warping.is_active()
            || self.moving_z.is_active()
    }

    /// The display mode last pushed to a receiver.
    pub fn display_mode(&self) -> DisplayMode {
        self.display.mode()
    }
}

impl<T: ViewTree> ActionManager<T> for TransformableActionManager<T::Key> {
    fn actions(&self) -> &'static [Action] {
        ACTIONS
    }

    fn send(&mut self, events: &EventMap, tree: &mut T) {
        self.display
            .update(events, tree, MODES, Capability::Transformable, |r, mode| {
                if let Some(t) = r.as_transformable() {
                    t.set_display_mode(mode);
                }
            });

        gesture(events, &MOVE, &mut self.moving, tree, Capability::Movable, |r, p, f| {
            if let Some(m) = r.as_movable() {
                m.move_to(p, f.pressure(), f.time(), f.phase);
            }
        });
        gesture(
            events,
            &TRANSFORM,
            &mut self.transforming,
            tree,
            Capability::Transformable,
            |r, p, f| {
                if let Some(t) = r.as_transformable() {
                    t.transform(p, f.pressure(), f.time(), f.phase);
                }
            },
        );
        gesture(
            events,
            &WARP,
            &mut self.warping,
            tree,
            Capability::Transformable,
            |r, p, f| {
                if let Some(t) = r.as_transformable() {
                    t.warp(p, f.pressure(), f.time(), f.phase);
                }
            },
        );
        gesture(
            events,
            &MOVE_Z,
            &mut self.moving_z,
            tree,
            Capability::Transformable,
            |r, p, f| {
                if let Some(t) = r.as_transformable() {
                    t.move_z(p, f.pressure(), f.time(), f.phase);
                }
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeTree, Harness};
    use alloc::vec;
    use kurbo::{Point, Rect};
    use understory_quasimode::Phase;
    use understory_quasimode::types::{COMMAND, CONTROL, DRAG, OPTION, SHIFT};

    fn shape() -> FakeTree {
        let mut tree = FakeTree::new();
        tree.add(
            "shape",
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &[Capability::Movable, Capability::Transformable],
        );
        tree
    }

    #[test]
    fn plain_drag_moves() {
        let mut h = Harness::new(TransformableActionManager::new(), shape());
        h.drag(DRAG, Phase::Began, Point::new(10.0, 10.0));
        assert!(h.manager.is_active());
        h.drag(DRAG, Phase::Changed, Point::new(20.0, 15.0));
        h.drag(DRAG, Phase::Ended, Point::new(30.0, 20.0));
        assert!(!h.manager.is_active());
        assert_eq!(
            h.calls(),
            vec![
                ("shape", Call::Move(Point::new(10.0, 10.0), Phase::Began)),
                ("shape", Call::Move(Point::new(20.0, 15.0), Phase::Changed)),
                ("shape", Call::Move(Point::new(30.0, 20.0), Phase::Ended)),
            ]
        );
    }

    #[test]
    fn option_drag_transforms_only() {
        let mut h = Harness::new(TransformableActionManager::new(), shape());
        h.key(OPTION, Phase::Began, Point::new(10.0, 10.0));
        assert_eq!(h.manager.display_mode(), DisplayMode::Transform);
        h.drag(DRAG, Phase::Began, Point::new(10.0, 10.0));
        h.drag(DRAG, Phase::Changed, Point::new(12.0, 12.0));
        h.drag(DRAG, Phase::Ended, Point::new(12.0, 12.0));
        h.key(OPTION, Phase::Ended, Point::new(12.0, 12.0));
        assert_eq!(h.manager.display_mode(), DisplayMode::None);
        assert_eq!(
            h.calls(),
            vec![
                ("shape", Call::DisplayMode(DisplayMode::Transform)),
                ("shape", Call::Transform(Point::new(10.0, 10.0), Phase::Began)),
                ("shape", Call::Transform(Point::new(12.0, 12.0), Phase::Changed)),
                ("shape", Call::Transform(Point::new(12.0, 12.0), Phase::Ended)),
                ("shape", Call::DisplayMode(DisplayMode::None)),
            ]
        );
    }

    #[test]
    fn modifiers_pick_warp_and_move_z() {
        let mut h = Harness::new(TransformableActionManager::new(), shape());
        let at = Point::new(50.0, 50.0);
        h.key(SHIFT, Phase::Began, at);
        h.key(OPTION, Phase::Began, at);
        h.drag(DRAG, Phase::Began, at);
        h.drag(DRAG, Phase::Ended, at);
        h.key(SHIFT, Phase::Ended, at);
        h.key(CONTROL, Phase::Began, at);
        h.drag(DRAG, Phase::Began, at);
        h.drag(DRAG, Phase::Ended, at);
        assert_eq!(
            h.calls(),
            vec![
                ("shape", Call::DisplayMode(DisplayMode::Warp)),
                ("shape", Call::Warp(at, Phase::Began)),
                ("shape", Call::Warp(at, Phase::Ended)),
                ("shape", Call::DisplayMode(DisplayMode::Transform)),
                ("shape", Call::DisplayMode(DisplayMode::MoveZ)),
                ("shape", Call::MoveZ(at, Phase::Began)),
                ("shape", Call::MoveZ(at, Phase::Ended)),
            ]
        );
    }

    #[test]
    fn extra_modifier_hides_the_handles() {
        let mut h = Harness::new(TransformableActionManager::new(), shape());
        let at = Point::new(50.0, 50.0);
        h.key(OPTION, Phase::Began, at);
        h.key(COMMAND, Phase::Began, at);
        assert_eq!(h.manager.display_mode(), DisplayMode::None);
        h.key(COMMAND, Phase::Ended, at);
        assert_eq!(
            h.calls(),
            vec![
                ("shape", Call::DisplayMode(DisplayMode::Transform)),
                ("shape", Call::DisplayMode(DisplayMode::None)),
                ("shape", Call::DisplayMode(DisplayMode::Transform)),
            ]
        );
    }

    #[test]
    fn suppression_mid_drag_closes_the_move() {
        let mut h = Harness::new(TransformableActionManager::new(), shape());
        h.drag(DRAG, Phase::Began, Point::new(10.0, 10.0));
        h.key(OPTION, Phase::Began, Point::new(20.0, 20.0));
        assert!(!h.manager.is_active());
        h.drag(DRAG, Phase::Changed, Point::new(30.0, 30.0));
        h.drag(DRAG, Phase::Ended, Point::new(40.0, 40.0));
        assert!(!h.manager.is_active());
        // The transform that took over began mid-drag, so it never reaches
        // the shape.
        assert_eq!(
            h.calls(),
            vec![
                ("shape", Call::Move(Point::new(10.0, 10.0), Phase::Began)),
                ("shape", Call::DisplayMode(DisplayMode::Transform)),
                ("shape", Call::Move(Point::new(10.0, 10.0), Phase::Ended)),
            ]
        );
    }

    #[test]
    fn all_three_modifiers_warp_and_move_z_together() {
        let mut h = Harness::new(TransformableActionManager::new(), shape());
        let at = Point::new(50.0, 50.0);
        h.key(SHIFT, Phase::Began, at);
        h.key(CONTROL, Phase::Began, at);
        h.key(OPTION, Phase::Began, at);
        h.drag(DRAG, Phase::Began, at);
        assert_eq!(
            h.calls(),
            vec![
                ("shape", Call::Warp(at, Phase::Began)),
                ("shape", Call::MoveZ(at, Phase::Began)),
            ]
        );
    }

    #[test]
    fn drag_off_the_shape_keeps_moving_it() {
        let mut h = Harness::new(TransformableActionManager::new(), shape());
        h.drag(DRAG, Phase::Began, Point::new(90.0, 90.0));
        h.drag(DRAG, Phase::Changed, Point::new(150.0, 150.0));
        h.drag(DRAG, Phase::Ended, Point::new(150.0, 150.0));
        assert_eq!(h.calls().len(), 3);
    }
}
