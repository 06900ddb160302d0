// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point editing on paths: display modes while modifiers are held, point
//! insertion and removal, and point and vertex drags.

use core::fmt::Debug;

use understory_quasimode::catalog::{
    EDIT_POINT_MODE, INSERT_POINT, MOVE_POINT, MOVE_VERTEX, REMOVE_POINT, VERTEX_MODE,
};
use understory_quasimode::{Action, EventMap};

use crate::manager::{ActionManager, ModeDisplay, gesture, one_shot};
use crate::receiver::{Capability, DisplayMode};
use crate::view::{GestureTarget, ViewTree};

const ACTIONS: &[Action] = &[
    EDIT_POINT_MODE,
    REMOVE_POINT,
    INSERT_POINT,
    MOVE_POINT,
    VERTEX_MODE,
    MOVE_VERTEX,
];

const MODES: &[(Action, DisplayMode)] = &[
    (EDIT_POINT_MODE, DisplayMode::EditPoint),
    (VERTEX_MODE, DisplayMode::Vertex),
];

/// Drives [`PointEditable`](crate::PointEditable) receivers.
///
/// The display mode follows the held modifiers rather than the arbitrated
/// action events, so it stays on while a point drag or an insertion shortcut
/// owns the modifier. The view under the pointer when the mode modifier went
/// down gets the mode; the previous view is reset to [`DisplayMode::None`].
#[derive(Clone, Debug)]
pub struct PointEditableActionManager<K> {
    display: ModeDisplay<K>,
    moving_point: GestureTarget<K>,
    moving_vertex: GestureTarget<K>,
}

impl<K> Default for PointEditableActionManager<K> {
    fn default() -> Self {
        Self {
            display: ModeDisplay::default(),
            moving_point: GestureTarget::default(),
            moving_vertex: GestureTarget::default(),
        }
    }
}

impl<K: Copy + Eq + Debug> PointEditableActionManager<K> {
    /// Create an idle manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// The display mode last pushed to a receiver.
    pub fn display_mode(&self) -> DisplayMode {
        self.display.mode()
    }
}

impl<T: ViewTree> ActionManager<T> for PointEditableActionManager<T::Key> {
    fn actions(&self) -> &'static [Action] {
        ACTIONS
    }

    fn send(&mut self, events: &EventMap, tree: &mut T) {
        self.display
            .update(events, tree, MODES, Capability::PointEditable, |r, mode| {
                if let Some(p) = r.as_point_editable() {
                    p.set_display_mode(mode);
                }
            });

        one_shot(events, &INSERT_POINT, tree, Capability::PointEditable, |r, p| {
            if let Some(e) = r.as_point_editable() {
                e.insert_point(p);
            }
        });
        one_shot(events, &REMOVE_POINT, tree, Capability::PointEditable, |r, p| {
            if let Some(e) = r.as_point_editable() {
                e.remove_nearest_point(p);
            }
        });

        gesture(
            events,
            &MOVE_POINT,
            &mut self.moving_point,
            tree,
            Capability::PointEditable,
            |r, p, f| {
                if let Some(e) = r.as_point_editable() {
                    e.move_point(p, f.pressure(), f.time(), f.phase);
                }
            },
        );
        gesture(
            events,
            &MOVE_VERTEX,
            &mut self.moving_vertex,
            tree,
            Capability::PointEditable,
            |r, p, f| {
                if let Some(e) = r.as_point_editable() {
                    e.move_vertex(p, f.pressure(), f.time(), f.phase);
                }
            },
        );
    }
}
