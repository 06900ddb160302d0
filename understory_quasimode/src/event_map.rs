// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live input state and per-tick action resolution.
//!
//! ## Tick
//!
//! One raw event is one tick:
//!
//! 1. [`EventMap::record`] stores the event in its channel's live table and
//!    marks its type as edited.
//! 2. [`EventMap::update_action_events`] recomputes which actions are live
//!    and in which composite phase.
//! 3. Consumers query [`EventMap::sendable_action_event`] and
//!    [`EventMap::sendable_action_event_tuple`].
//! 4. [`EventMap::remove_ended_action_events`] and [`EventMap::settle`] close
//!    the tick.
//!
//! A released type stays in its table, with phase `Ended`, until
//! [`EventMap::settle`]; this keeps the final payload readable during the tick
//! it ends in. Settling also demotes `Began` entries to `Changed`, so a press is
//! reported as `Began` for exactly one tick.
//!
//! ## Example
//!
//! ```
//! use understory_quasimode::{Catalog, DragEvent, EventMap, KeyEvent, Phase, catalog, types};
//!
//! let catalog = Catalog::standard();
//! let mut map = EventMap::new();
//!
//! // Hold command.
//! map.record(types::COMMAND, KeyEvent { phase: Phase::Began, ..KeyEvent::default() }).unwrap();
//! map.update_action_events(&catalog);
//! map.remove_ended_action_events();
//! map.settle();
//!
//! // Start dragging: command+drag is `select`, and plain `move` is suppressed.
//! map.record(types::DRAG, DragEvent { phase: Phase::Began, ..DragEvent::default() }).unwrap();
//! map.update_action_events(&catalog);
//! let select = map.sendable_action_event(&catalog::SELECT).unwrap();
//! assert_eq!(select.phase, Phase::Began);
//! assert!(map.action_event(&catalog::MOVE).is_none());
//! ```

use alloc::vec::Vec;

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::action::{Action, ActionEvent};
use crate::catalog::Catalog;
use crate::error::Error;
use crate::event::{ChannelEvent, Eventable, Phase};
use crate::types::{Channel, EventableType};

/// Insertion-ordered live entries of one channel, at most one per type.
#[derive(Clone, Debug, Default)]
struct LiveTable {
    entries: SmallVec<[(EventableType, Eventable); 4]>,
}

impl LiveTable {
    fn get(&self, ty: EventableType) -> Option<&Eventable> {
        self.entries
            .iter()
            .find(|(t, _)| *t == ty)
            .map(|(_, event)| event)
    }

    fn get_mut(&mut self, ty: EventableType) -> Option<&mut Eventable> {
        self.entries
            .iter_mut()
            .find(|(t, _)| *t == ty)
            .map(|(_, event)| event)
    }
}

/// Result of arbitrating between actions that share a trigger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendableTuple {
    /// The action event to dispatch as the gesture.
    pub main: ActionEvent,
    /// Overlapping action events, each forced to [`Phase::Changed`].
    pub subs: SmallVec<[ActionEvent; 2]>,
}

/// Live per-channel input state plus the resolved action events of the current tick.
#[derive(Clone, Debug, Default)]
pub struct EventMap {
    tables: [LiveTable; 5],
    action_events: Vec<ActionEvent>,
    edited_types: SmallVec<[EventableType; 2]>,
}

impl EventMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, channel: Channel) -> &LiveTable {
        &self.tables[channel.index()]
    }

    fn table_mut(&mut self, channel: Channel) -> &mut LiveTable {
        &mut self.tables[channel.index()]
    }

    /// Record a raw event for `ty`.
    ///
    /// - `Began` inserts a live entry. A `Began` for a type that is already
    ///   live is an auto-repeat and is ignored.
    /// - `Changed` replaces the entry.
    /// - `Ended` replaces the entry; it is dropped by [`EventMap::settle`].
    ///
    /// `Changed` and `Ended` for a type with no live entry are ignored, so a
    /// stray hover or momentum frame never makes an action hittable.
    ///
    /// Returns whether the type was marked edited.
    pub fn record(
        &mut self,
        ty: EventableType,
        event: impl Into<Eventable>,
    ) -> Result<bool, Error> {
        let event = event.into();
        if event.channel() != ty.channel() {
            return Err(Error::ChannelMismatch {
                name: ty.name(),
                expected: ty.channel(),
                actual: event.channel(),
            });
        }
        let table = self.table_mut(ty.channel());
        match (table.get_mut(ty), event.phase()) {
            (Some(_), Phase::Began) => {
                tracing::trace!(ty = ty.name(), "ignoring repeated began");
                return Ok(false);
            }
            (Some(entry), _) => *entry = event,
            (None, Phase::Began) => table.entries.push((ty, event)),
            (None, phase) => {
                tracing::debug!(ty = ty.name(), ?phase, "no live entry; ignoring");
                return Ok(false);
            }
        }
        if !self.edited_types.contains(&ty) {
            self.edited_types.push(ty);
        }
        Ok(true)
    }

    /// Live entry for `ty`, if any.
    pub fn event(&self, ty: EventableType) -> Option<&Eventable> {
        self.table(ty.channel()).get(ty)
    }

    /// Live entry for `ty` as a concrete payload.
    pub fn latest<E: ChannelEvent>(&self, ty: EventableType) -> Option<&E> {
        self.event(ty).and_then(E::from_eventable)
    }

    /// Live entries of one channel in insertion order.
    pub fn live_events(
        &self,
        channel: Channel,
    ) -> impl Iterator<Item = (EventableType, &Eventable)> + '_ {
        self.table(channel).entries.iter().map(|(ty, e)| (*ty, e))
    }

    /// Every live type across all channels.
    pub fn live_types(&self) -> impl Iterator<Item = EventableType> + '_ {
        self.tables
            .iter()
            .flat_map(|table| table.entries.iter().map(|(ty, _)| *ty))
    }

    /// Whether `ty` has a live entry.
    pub fn is_live(&self, ty: EventableType) -> bool {
        self.event(ty).is_some()
    }

    /// Types edited during the current tick.
    pub fn edited_types(&self) -> &[EventableType] {
        &self.edited_types
    }

    /// Whether every type of `action` is live and none is ending this tick.
    ///
    /// Unlike [`EventMap::action_event`] this ignores suppression: it answers
    /// "is the quasimode held", not "is the action firing".
    pub fn is_held(&self, action: &Action) -> bool {
        action
            .quasimode
            .types()
            .all(|ty| self.event(ty).is_some_and(|e| e.phase() != Phase::Ended))
    }

    /// Whether `action` is held and no other modifier is.
    ///
    /// Display modes bound to bare modifiers use this: `control` shows one
    /// mode, `shift+control` another, and neither shows under
    /// `command+control`. Non-modifier types, like the drag of a point move,
    /// do not count against the mode.
    pub fn is_held_alone(&self, action: &Action) -> bool {
        self.is_held(action)
            && self.live_events(Channel::Key).all(|(ty, e)| {
                !ty.is_modifier() || e.phase() == Phase::Ended || action.quasimode.contains(ty)
            })
    }

    /// Device event driving `action`: the live entry of its last trigger, or
    /// of its last modifier for modifier-only quasimodes.
    pub fn device_event(&self, action: &Action) -> Option<&Eventable> {
        self.event(action.quasimode.device_type()?)
    }

    /// Action events resolved for the current tick, in catalog order.
    pub fn action_events(&self) -> &[ActionEvent] {
        &self.action_events
    }

    /// Resolved event for `action`, if it is live this tick.
    pub fn action_event(&self, action: &Action) -> Option<ActionEvent> {
        self.action_events
            .iter()
            .find(|e| e.action == *action)
            .copied()
    }

    /// Recompute the live action events from the live tables.
    ///
    /// Candidates are the actions whose every type is live; a candidate is
    /// dropped if its types are a subset of another candidate's. Survivors
    /// that were live last tick take their phase from
    /// [`EventMap::phase_with`]. New survivors begin, unless one of their
    /// types is being released this tick. Actions that were live but no
    /// longer survive end.
    ///
    /// A released type stays live until [`EventMap::settle`], so a release
    /// ends its actions through [`EventMap::phase_with`]. A survivor can still
    /// be new on a release tick when the previous tick's settle dropped the
    /// type that suppressed it: releasing `shift` and then `command` in the
    /// middle of a deselect must not begin `select` on the way out.
    pub fn update_action_events(&mut self, catalog: &Catalog) {
        let live: HashSet<&'static str> = self.live_types().map(EventableType::name).collect();
        let candidates: SmallVec<[&Action; 8]> = catalog
            .actions()
            .iter()
            .filter(|a| a.quasimode.types().all(|ty| live.contains(ty.name())))
            .collect();
        let survives = |a: &Action| {
            candidates.iter().any(|c| *c == a)
                && !candidates
                    .iter()
                    .any(|b| b.name != a.name && a.is_subset_of(b))
        };

        let mut next = Vec::with_capacity(candidates.len());
        for action in catalog.actions() {
            let was_live = self
                .action_events
                .iter()
                .any(|e| e.action == *action && e.phase != Phase::Ended);
            if survives(action) {
                if was_live {
                    next.push(ActionEvent::new(*action, self.phase_with(action)));
                } else if !self.has_released_type(action) {
                    next.push(ActionEvent::new(*action, Phase::Began));
                }
            } else if was_live {
                next.push(ActionEvent::new(*action, Phase::Ended));
            }
        }

        if tracing::enabled!(tracing::Level::TRACE) {
            for event in &next {
                tracing::trace!(action = event.action.name, phase = ?event.phase, "action event");
            }
        }
        self.action_events = next;
    }

    /// Whether one of `action`'s types is being released this tick.
    fn has_released_type(&self, action: &Action) -> bool {
        action
            .quasimode
            .types()
            .any(|ty| self.event(ty).is_some_and(|e| e.phase() == Phase::Ended))
    }

    /// Composite phase of `action` from its types' live entries.
    ///
    /// Types are visited in declared order; a missing entry ends the action,
    /// the first entry that is not `Changed` decides the phase, and if every
    /// entry is `Changed` so is the action.
    pub fn phase_with(&self, action: &Action) -> Phase {
        for ty in action.quasimode.types() {
            match self.event(ty).map(Eventable::phase) {
                None => return Phase::Ended,
                Some(Phase::Changed) => {}
                Some(phase) => return phase,
            }
        }
        Phase::Changed
    }

    /// The action event of `action`, if it may be dispatched this tick.
    ///
    /// An event is dispatchable when one of the action's types was edited this
    /// tick. An action that ends because a more specific one took over is
    /// live but not dispatchable: none of its own types changed.
    pub fn sendable_action_event(&self, action: &Action) -> Option<ActionEvent> {
        let edited = action
            .quasimode
            .types()
            .any(|ty| self.edited_types.contains(&ty));
        if !edited {
            return None;
        }
        self.action_event(action)
    }

    /// Arbitrate between actions that share a trigger.
    ///
    /// With no dispatchable event this returns `None`; with exactly one, it is
    /// the main event. With several, the first (in `actions` order) whose phase
    /// is `Began` is the main event and the others become subs with their phase
    /// forced to `Changed`; if none began, nothing is dispatched.
    pub fn sendable_action_event_tuple(&self, actions: &[Action]) -> Option<SendableTuple> {
        let sendable: SmallVec<[ActionEvent; 4]> = actions
            .iter()
            .filter_map(|a| self.sendable_action_event(a))
            .collect();
        match sendable.len() {
            0 => None,
            1 => Some(SendableTuple {
                main: sendable[0],
                subs: SmallVec::new(),
            }),
            _ => {
                let main_index = sendable.iter().position(|e| e.phase == Phase::Began)?;
                let main = sendable[main_index];
                let subs = sendable
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != main_index)
                    .map(|(_, e)| e.with_phase(Phase::Changed))
                    .collect();
                Some(SendableTuple { main, subs })
            }
        }
    }

    /// Drop the action events that ended this tick.
    pub fn remove_ended_action_events(&mut self) {
        self.action_events.retain(|e| e.phase != Phase::Ended);
    }

    /// Close the tick: drop ended entries, demote began entries to changed,
    /// and clear the edited set.
    pub fn settle(&mut self) {
        for table in &mut self.tables {
            table.entries.retain(|(_, e)| e.phase() != Phase::Ended);
            for (_, event) in &mut table.entries {
                if event.phase() == Phase::Began {
                    event.set_phase(Phase::Changed);
                }
            }
        }
        self.edited_types.clear();
    }

    /// Forget all live input and action events.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
