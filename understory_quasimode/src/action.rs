// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quasimodes, actions, and phase-tagged action events.

use core::fmt;
use core::hash::{Hash, Hasher};

use crate::event::Phase;
use crate::types::EventableType;

/// The exact input signature an [`Action`] demands: modifiers that must be
/// held plus the triggers that drive it.
///
/// The split between modifiers and triggers is for display and for picking
/// the device event of an action; matching treats the concatenation as a set
/// of names.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Quasimode {
    /// Types that must be held.
    pub modifier_types: &'static [EventableType],
    /// Types that drive the action.
    pub trigger_types: &'static [EventableType],
}

impl Quasimode {
    /// Create a quasimode from modifiers and triggers.
    pub const fn new(
        modifier_types: &'static [EventableType],
        trigger_types: &'static [EventableType],
    ) -> Self {
        Self {
            modifier_types,
            trigger_types,
        }
    }

    /// Modifiers followed by triggers.
    pub fn types(&self) -> impl Iterator<Item = EventableType> + '_ {
        self.modifier_types
            .iter()
            .chain(self.trigger_types)
            .copied()
    }

    /// Whether `ty` appears anywhere in the signature.
    pub fn contains(&self, ty: EventableType) -> bool {
        self.types().any(|t| t == ty)
    }

    /// Whether the signature has no types at all.
    pub fn is_empty(&self) -> bool {
        self.modifier_types.is_empty() && self.trigger_types.is_empty()
    }

    /// The type whose device event represents the whole quasimode: the last
    /// trigger, or the last modifier for modifier-only quasimodes.
    pub fn device_type(&self) -> Option<EventableType> {
        self.trigger_types
            .last()
            .or_else(|| self.modifier_types.last())
            .copied()
    }
}

impl fmt::Display for Quasimode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ty) in self.types().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            f.write_str(ty.name())?;
        }
        Ok(())
    }
}

/// A named, user-facing operation bound to a quasimode.
///
/// Names are unique across a [`Catalog`](crate::Catalog); equality and hashing
/// use the name only.
#[derive(Copy, Clone, Debug)]
pub struct Action {
    /// Unique name.
    pub name: &'static str,
    /// Human readable description.
    pub description: &'static str,
    /// Input signature.
    pub quasimode: Quasimode,
}

impl Action {
    /// Create an action.
    pub const fn new(name: &'static str, description: &'static str, quasimode: Quasimode) -> Self {
        Self {
            name,
            description,
            quasimode,
        }
    }

    /// True if every type of this action also appears in `other`'s quasimode.
    ///
    /// Non-strict: an action is a subset of itself and of any action with the
    /// same signature.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.quasimode.types().all(|ty| other.quasimode.contains(ty))
    }

    /// True if both actions require exactly the same set of types.
    pub fn has_same_signature(&self, other: &Self) -> bool {
        self.is_subset_of(other) && other.is_subset_of(self)
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Action {}

impl Hash for Action {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.quasimode)
    }
}

/// An [`Action`] bound to its composite phase for the current tick.
///
/// Regenerated by [`EventMap::update_action_events`](crate::EventMap::update_action_events)
/// every tick. Equality uses the action name only.
#[derive(Copy, Clone, Debug)]
pub struct ActionEvent {
    /// The action.
    pub action: Action,
    /// Composite phase, independent of any single device phase.
    pub phase: Phase,
}

impl ActionEvent {
    /// Create an action event.
    pub const fn new(action: Action, phase: Phase) -> Self {
        Self { action, phase }
    }

    /// Same action, different phase.
    pub const fn with_phase(self, phase: Phase) -> Self {
        Self {
            action: self.action,
            phase,
        }
    }

    /// First-frame alignment gate.
    ///
    /// A composite `Began` only passes if the device event that drives the
    /// action also began this frame; `Changed` and `Ended` always pass.
    pub fn is_sendable(&self, device_phase: Phase) -> bool {
        self.phase != Phase::Began || device_phase == Phase::Began
    }
}

impl PartialEq for ActionEvent {
    fn eq(&self, other: &Self) -> bool {
        self.action == other.action
    }
}

impl Eq for ActionEvent {}
