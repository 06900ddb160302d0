// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tick driver.
//!
//! ## Overview
//!
//! A [`Sender`] turns each raw input event into one tick:
//!
//! 1. record the event in the [`EventMap`],
//! 2. resolve the tick's action events against the [`Catalog`],
//! 3. hand the map to every manager in order,
//! 4. drop ended action events and settle the map for the next tick.
//!
//! Events that change nothing (auto-repeat, a change or release with no
//! press) stop after the first step.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use understory_quasimode::{
    Catalog, ChannelEvent, DragEvent, EventMap, EventableType, KeyEvent, PinchEvent, RotateEvent,
    ScrollEvent,
};

use crate::error::ActionError;
use crate::manager::ActionManager;
use crate::managers::default_managers;
use crate::view::ViewTree;

/// Feeds raw input into the managers, one tick per event.
///
/// ## Usage
///
/// - Construct with [`Sender::new`] for the standard managers, or with
///   [`Sender::with_managers`] to choose them.
/// - Call one of the `send_*` methods for every raw device event, passing
///   the view tree the managers should hit-test and deliver into.
pub struct Sender<T: ViewTree> {
    catalog: Catalog,
    events: EventMap,
    managers: Vec<Box<dyn ActionManager<T>>>,
}

impl<T: ViewTree> fmt::Debug for Sender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender")
            .field("catalog", &self.catalog)
            .field("events", &self.events)
            .field("managers", &self.managers.len())
            .finish()
    }
}

impl<T: ViewTree> Default for Sender<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ViewTree> Sender<T> {
    /// Create a sender with one of each standard manager over the standard catalog.
    pub fn new() -> Self {
        Self::from_parts(Catalog::standard(), default_managers())
    }

    /// Create a sender over exactly the actions `managers` declare.
    ///
    /// Fails when two managers declare the same action, or when two actions
    /// could never be told apart.
    pub fn with_managers(managers: Vec<Box<dyn ActionManager<T>>>) -> Result<Self, ActionError> {
        let catalog = Catalog::new(
            managers
                .iter()
                .flat_map(|m| m.actions().iter().copied()),
        )?;
        Ok(Self::from_parts(catalog, managers))
    }

    fn from_parts(catalog: Catalog, managers: Vec<Box<dyn ActionManager<T>>>) -> Self {
        for manager in &managers {
            for (a, b) in catalog.ambiguities(manager.actions()) {
                tracing::warn!(
                    first = a.name,
                    second = b.name,
                    "ambiguous actions in one manager; both may fire on the same input"
                );
            }
        }
        for (a, b) in catalog.ambiguities(catalog.actions()) {
            tracing::debug!(first = a.name, second = b.name, "ambiguous action pair");
        }
        Self {
            catalog,
            events: EventMap::new(),
            managers,
        }
    }

    /// The catalog actions are resolved against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Live input state, as settled after the last tick.
    pub fn event_map(&self) -> &EventMap {
        &self.events
    }

    /// Run one tick for a raw event of type `ty`.
    ///
    /// A payload from the wrong channel is rejected before any state changes.
    pub fn send<E: ChannelEvent>(
        &mut self,
        ty: EventableType,
        event: E,
        tree: &mut T,
    ) -> Result<(), ActionError> {
        if !self.events.record(ty, event)? {
            return Ok(());
        }
        tracing::trace!(ty = ty.name(), "tick");
        self.events.update_action_events(&self.catalog);
        for manager in &mut self.managers {
            manager.send(&self.events, tree);
        }
        self.events.remove_ended_action_events();
        self.events.settle();
        Ok(())
    }

    /// Run one tick for a key press, repeat or release.
    pub fn send_key(
        &mut self,
        ty: EventableType,
        event: KeyEvent,
        tree: &mut T,
    ) -> Result<(), ActionError> {
        self.send(ty, event, tree)
    }

    /// Run one tick for a pointer drag.
    pub fn send_drag(
        &mut self,
        ty: EventableType,
        event: DragEvent,
        tree: &mut T,
    ) -> Result<(), ActionError> {
        self.send(ty, event, tree)
    }

    /// Run one tick for a scroll.
    pub fn send_scroll(
        &mut self,
        ty: EventableType,
        event: ScrollEvent,
        tree: &mut T,
    ) -> Result<(), ActionError> {
        self.send(ty, event, tree)
    }

    /// Run one tick for a pinch.
    pub fn send_pinch(
        &mut self,
        ty: EventableType,
        event: PinchEvent,
        tree: &mut T,
    ) -> Result<(), ActionError> {
        self.send(ty, event, tree)
    }

    /// Run one tick for a two-finger rotation.
    pub fn send_rotate(
        &mut self,
        ty: EventableType,
        event: RotateEvent,
        tree: &mut T,
    ) -> Result<(), ActionError> {
        self.send(ty, event, tree)
    }
}
