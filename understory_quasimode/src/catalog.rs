// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The action catalog.
//!
//! The standard actions are compile-time constants. A [`Catalog`] is the
//! validated, ordered list handed to
//! [`EventMap::update_action_events`](crate::EventMap::update_action_events);
//! its order is the order in which action events are reported and in which
//! arbitration picks a main action.
//!
//! ## Resolving overlaps
//!
//! When two candidates are both hittable, the one whose requirements are a
//! subset of the other's is suppressed ("more specific wins"). Two actions
//! that share a trigger but are incomparable both fire when the union of
//! their types is held, unless a third action covers both. The standard
//! catalog has one such pair: [`WARP`] (`shift+option+drag`) and [`MOVE_Z`]
//! (`control+option+drag`) under `shift+control+option+drag`.
//! [`Catalog::ambiguities`] lists these pairs so that a host can check the
//! actions it routes to one receiver.

use alloc::vec::Vec;

use crate::action::{Action, Quasimode};
use crate::error::CatalogError;
use crate::types::{
    A, B, C, CLICK, COMMAND, CONTROL, D, DRAG, OPTION, PINCH, POINTING, ROTATE, SCROLL, SHIFT,
    SUB_CLICK, SUB_DRAG, TAP, V, X, Z,
};

/// Highlight whatever is under the pointer.
pub const INDICATE: Action = Action::new(
    "indicate",
    "Highlight the object under the pointer",
    Quasimode::new(&[], &[POINTING]),
);
/// Rubber-band select.
pub const SELECT: Action = Action::new(
    "select",
    "Select objects inside the dragged rectangle",
    Quasimode::new(&[COMMAND], &[DRAG]),
);
/// Select everything.
pub const SELECT_ALL: Action = Action::new(
    "selectAll",
    "Select every object",
    Quasimode::new(&[COMMAND], &[A]),
);
/// Rubber-band deselect.
pub const DESELECT: Action = Action::new(
    "deselect",
    "Deselect objects inside the dragged rectangle",
    Quasimode::new(&[SHIFT, COMMAND], &[DRAG]),
);
/// Deselect everything.
pub const DESELECT_ALL: Action = Action::new(
    "deselectAll",
    "Deselect every object",
    Quasimode::new(&[SHIFT, COMMAND], &[A]),
);
/// Bind.
pub const BIND: Action = Action::new(
    "bind",
    "Bind the object under the pointer",
    Quasimode::new(&[], &[SUB_CLICK]),
);
/// Scroll.
pub const SCROLL_VIEW: Action = Action::new(
    "scroll",
    "Scroll the view",
    Quasimode::new(&[], &[SCROLL]),
);
/// Pinch zoom.
pub const ZOOM: Action = Action::new(
    "zoom",
    "Zoom the view",
    Quasimode::new(&[], &[PINCH]),
);
/// Reset zoom, rotation and scroll.
pub const RESET_VIEW: Action = Action::new(
    "resetView",
    "Reset the view transform",
    Quasimode::new(&[COMMAND], &[B]),
);
/// Two-finger rotation.
pub const ROTATE_VIEW: Action = Action::new(
    "rotate",
    "Rotate the view",
    Quasimode::new(&[], &[ROTATE]),
);
/// Look up a description of the object under the pointer.
pub const LOOK_UP: Action = Action::new(
    "lookUp",
    "Show the reference of the object under the pointer",
    Quasimode::new(&[], &[TAP]),
);
/// Undo.
pub const UNDO: Action = Action::new(
    "undo",
    "Undo the last edit",
    Quasimode::new(&[COMMAND], &[Z]),
);
/// Redo.
pub const REDO: Action = Action::new(
    "redo",
    "Redo the last undone edit",
    Quasimode::new(&[SHIFT, COMMAND], &[Z]),
);
/// Cut.
pub const CUT: Action = Action::new(
    "cut",
    "Copy then delete the object under the pointer",
    Quasimode::new(&[COMMAND], &[X]),
);
/// Copy.
pub const COPY: Action = Action::new(
    "copy",
    "Copy the object under the pointer",
    Quasimode::new(&[COMMAND], &[C]),
);
/// Paste.
pub const PASTE: Action = Action::new(
    "paste",
    "Paste copied objects at the pointer",
    Quasimode::new(&[COMMAND], &[V]),
);
/// New.
pub const NEW: Action = Action::new(
    "new",
    "Create a new object at the pointer",
    Quasimode::new(&[COMMAND], &[D]),
);
/// Run.
pub const RUN: Action = Action::new(
    "run",
    "Run the object under the pointer",
    Quasimode::new(&[], &[CLICK]),
);
/// Move.
pub const MOVE: Action = Action::new(
    "move",
    "Move the object under the pointer",
    Quasimode::new(&[], &[DRAG]),
);
/// Show transform handles while held.
pub const TRANSFORM_MODE: Action = Action::new(
    "transformMode",
    "Show transform handles",
    Quasimode::new(&[OPTION], &[]),
);
/// Transform (scale and rotate).
pub const TRANSFORM: Action = Action::new(
    "transform",
    "Transform the object under the pointer",
    Quasimode::new(&[OPTION], &[DRAG]),
);
/// Show warp handles while held.
pub const WARP_MODE: Action = Action::new(
    "warpMode",
    "Show warp handles",
    Quasimode::new(&[SHIFT, OPTION], &[]),
);
/// Warp.
pub const WARP: Action = Action::new(
    "warp",
    "Warp the object under the pointer",
    Quasimode::new(&[SHIFT, OPTION], &[DRAG]),
);
/// Show stacking handles while held.
pub const MOVE_Z_MODE: Action = Action::new(
    "moveZMode",
    "Show stacking handles",
    Quasimode::new(&[CONTROL, OPTION], &[]),
);
/// Move in depth.
pub const MOVE_Z: Action = Action::new(
    "moveZ",
    "Change the stacking order of the object under the pointer",
    Quasimode::new(&[CONTROL, OPTION], &[DRAG]),
);
/// Stroke.
pub const STROKE: Action = Action::new(
    "stroke",
    "Draw a stroke",
    Quasimode::new(&[], &[SUB_DRAG]),
);
/// Lasso erase.
pub const LASSO_ERASE: Action = Action::new(
    "lassoErase",
    "Erase lines inside the lasso",
    Quasimode::new(&[SHIFT], &[SUB_DRAG]),
);
/// Show editable points while held.
pub const EDIT_POINT_MODE: Action = Action::new(
    "editPointMode",
    "Show editable points",
    Quasimode::new(&[CONTROL], &[]),
);
/// Remove the nearest point.
pub const REMOVE_POINT: Action = Action::new(
    "removePoint",
    "Remove the point nearest to the pointer",
    Quasimode::new(&[CONTROL], &[X]),
);
/// Insert a point.
pub const INSERT_POINT: Action = Action::new(
    "insertPoint",
    "Insert a point at the pointer",
    Quasimode::new(&[CONTROL], &[D]),
);
/// Move a point.
pub const MOVE_POINT: Action = Action::new(
    "movePoint",
    "Move the point nearest to the pointer",
    Quasimode::new(&[CONTROL], &[DRAG]),
);
/// Show editable vertices while held.
pub const VERTEX_MODE: Action = Action::new(
    "vertexMode",
    "Show editable vertices",
    Quasimode::new(&[SHIFT, CONTROL], &[]),
);
/// Move a vertex.
pub const MOVE_VERTEX: Action = Action::new(
    "moveVertex",
    "Move the vertex nearest to the pointer",
    Quasimode::new(&[SHIFT, CONTROL], &[DRAG]),
);

/// Every standard action, in catalog order.
pub const ALL: &[Action] = &[
    INDICATE,
    SELECT,
    SELECT_ALL,
    DESELECT,
    DESELECT_ALL,
    BIND,
    SCROLL_VIEW,
    ZOOM,
    RESET_VIEW,
    ROTATE_VIEW,
    LOOK_UP,
    UNDO,
    REDO,
    CUT,
    COPY,
    PASTE,
    NEW,
    RUN,
    MOVE,
    TRANSFORM_MODE,
    TRANSFORM,
    WARP_MODE,
    WARP,
    MOVE_Z_MODE,
    MOVE_Z,
    STROKE,
    LASSO_ERASE,
    EDIT_POINT_MODE,
    REMOVE_POINT,
    INSERT_POINT,
    MOVE_POINT,
    VERTEX_MODE,
    MOVE_VERTEX,
];

/// A validated, ordered set of actions.
#[derive(Clone, Debug)]
pub struct Catalog {
    actions: Vec<Action>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate names, identical signatures, and
    /// empty quasimodes.
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Result<Self, CatalogError> {
        let actions: Vec<Action> = actions.into_iter().collect();
        for (i, a) in actions.iter().enumerate() {
            if a.quasimode.is_empty() {
                return Err(CatalogError::EmptyQuasimode(a.name));
            }
            for b in &actions[i + 1..] {
                if a.name == b.name {
                    return Err(CatalogError::DuplicateName(a.name));
                }
                if a.has_same_signature(b) {
                    return Err(CatalogError::IdenticalQuasimode {
                        first: a.name,
                        second: b.name,
                    });
                }
            }
        }
        Ok(Self { actions })
    }

    /// The standard catalog ([`ALL`]).
    pub fn standard() -> Self {
        Self {
            actions: ALL.to_vec(),
        }
    }

    /// Actions in catalog order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Whether an action with this name is in the catalog.
    pub fn contains(&self, action: &Action) -> bool {
        self.actions.contains(action)
    }

    /// Look up an action by name.
    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Pairs within `group` that can be hittable together and would both
    /// survive suppression.
    ///
    /// A pair is reported when the two actions share a trigger type, neither
    /// is a subset of the other, and no action in this catalog requires the
    /// union of both (such an action would suppress the pair).
    pub fn ambiguities(&self, group: &[Action]) -> Vec<(Action, Action)> {
        let mut out = Vec::new();
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                let shares_trigger = a
                    .quasimode
                    .trigger_types
                    .iter()
                    .any(|ty| b.quasimode.trigger_types.contains(ty));
                if !shares_trigger || a.is_subset_of(b) || b.is_subset_of(a) {
                    continue;
                }
                let resolved = self
                    .actions
                    .iter()
                    .any(|c| a.is_subset_of(c) && b.is_subset_of(c));
                if !resolved {
                    out.push((*a, *b));
                }
            }
        }
        out
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
