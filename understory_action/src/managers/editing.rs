// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document editing shortcuts: undo and redo, and the pasteboard.

use alloc::vec::Vec;

use understory_quasimode::catalog::{COPY, CUT, PASTE, REDO, UNDO};
use understory_quasimode::{Action, EventMap};

use crate::manager::{ActionManager, one_shot};
use crate::receiver::{Capability, CopiedObject};
use crate::view::ViewTree;

/// Undo and redo on the view under the pointer.
#[derive(Copy, Clone, Debug, Default)]
pub struct UndoableActionManager;

impl<T: ViewTree> ActionManager<T> for UndoableActionManager {
    fn actions(&self) -> &'static [Action] {
        const ACTIONS: &[Action] = &[UNDO, REDO];
        ACTIONS
    }

    fn send(&mut self, events: &EventMap, tree: &mut T) {
        one_shot(events, &UNDO, tree, Capability::Undoable, |r, _| {
            if let Some(u) = r.as_undoable() {
                u.undo();
            }
        });
        one_shot(events, &REDO, tree, Capability::Undoable, |r, _| {
            if let Some(u) = r.as_undoable() {
                u.redo();
            }
        });
    }
}

/// Cut, copy and paste through a pasteboard owned by the manager.
///
/// A cut or copy that yields no objects leaves the pasteboard alone, and such
/// a cut deletes nothing.
#[derive(Clone, Debug, Default)]
pub struct CopiableActionManager {
    pasteboard: Vec<CopiedObject>,
}

impl CopiableActionManager {
    /// Create a manager with an empty pasteboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects from the last copy or cut.
    pub fn pasteboard(&self) -> &[CopiedObject] {
        &self.pasteboard
    }
}

impl<T: ViewTree> ActionManager<T> for CopiableActionManager {
    fn actions(&self) -> &'static [Action] {
        const ACTIONS: &[Action] = &[CUT, COPY, PASTE];
        ACTIONS
    }

    fn send(&mut self, events: &EventMap, tree: &mut T) {
        let pasteboard = &mut self.pasteboard;
        one_shot(events, &CUT, tree, Capability::Copiable, |r, p| {
            let Some(c) = r.as_copiable() else {
                return;
            };
            let copied = c.copied_objects(p);
            if copied.is_empty() {
                tracing::debug!("nothing to cut");
                return;
            }
            c.delete(p);
            *pasteboard = copied;
        });
        one_shot(events, &COPY, tree, Capability::Copiable, |r, p| {
            let Some(c) = r.as_copiable() else {
                return;
            };
            let copied = c.copied_objects(p);
            if copied.is_empty() {
                tracing::debug!("nothing to copy");
                return;
            }
            *pasteboard = copied;
        });
        if pasteboard.is_empty() {
            return;
        }
        one_shot(events, &PASTE, tree, Capability::Copiable, |r, p| {
            if let Some(c) = r.as_copiable() {
                c.paste(pasteboard.as_slice(), p);
            }
        });
    }
}
