// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_quasimode::catalog::LOOK_UP;
use understory_quasimode::{Action, EventMap};

use crate::manager::{ActionManager, one_shot};
use crate::receiver::{Capability, Reference};
use crate::view::ViewTree;

const ACTIONS: &[Action] = &[LOOK_UP];

/// Looks up the object under the pointer on a tap.
///
/// The answer is kept until the next successful look up, for the host to
/// show wherever it shows references.
#[derive(Clone, Debug, Default)]
pub struct QueryableActionManager {
    reference: Option<Reference>,
}

impl QueryableActionManager {
    /// Create a manager with nothing looked up yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last reference looked up.
    pub fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    /// Hand over the last reference, leaving none.
    pub fn take_reference(&mut self) -> Option<Reference> {
        self.reference.take()
    }
}

impl<T: ViewTree> ActionManager<T> for QueryableActionManager {
    fn actions(&self) -> &'static [Action] {
        ACTIONS
    }

    fn send(&mut self, events: &EventMap, tree: &mut T) {
        let slot = &mut self.reference;
        one_shot(events, &LOOK_UP, tree, Capability::Queryable, |r, p| {
            if let Some(q) = r.as_queryable() {
                let reference = q.reference(p);
                tracing::debug!(name = %reference.name, "looked up");
                *slot = Some(reference);
            }
        });
    }
}
