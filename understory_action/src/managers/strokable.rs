// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

use understory_quasimode::catalog::{LASSO_ERASE, STROKE};
use understory_quasimode::{Action, EventMap};

use crate::manager::{ActionManager, gesture};
use crate::receiver::Capability;
use crate::view::{GestureTarget, ViewTree};

const ACTIONS: &[Action] = &[STROKE, LASSO_ERASE];

/// Pen strokes and lasso erasing on the secondary drag channel.
#[derive(Clone, Debug)]
pub struct StrokableActionManager<K> {
    stroking: GestureTarget<K>,
    erasing: GestureTarget<K>,
}

impl<K> Default for StrokableActionManager<K> {
    fn default() -> Self {
        Self {
            stroking: GestureTarget::default(),
            erasing: GestureTarget::default(),
        }
    }
}

impl<K: Copy + Eq + Debug> StrokableActionManager<K> {
    /// Create an idle manager.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: ViewTree> ActionManager<T> for StrokableActionManager<T::Key> {
    fn actions(&self) -> &'static [Action] {
        ACTIONS
    }

    fn send(&mut self, events: &EventMap, tree: &mut T) {
        gesture(events, &STROKE, &mut self.stroking, tree, Capability::Strokable, |r, p, f| {
            if let Some(s) = r.as_strokable() {
                s.stroke(p, f.pressure(), f.time(), f.phase);
            }
        });
        gesture(
            events,
            &LASSO_ERASE,
            &mut self.erasing,
            tree,
            Capability::Strokable,
            |r, p, f| {
                if let Some(s) = r.as_strokable() {
                    s.lasso_erase(p, f.pressure(), f.time(), f.phase);
                }
            },
        );
    }
}
