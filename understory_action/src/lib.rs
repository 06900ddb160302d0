// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Action: route quasimode actions to the objects under the pointer.
//!
//! [`understory_quasimode`] decides which actions are firing and in which
//! phase. This crate decides who receives them:
//!
//! - Objects opt into action families by implementing capability traits such
//!   as [`Selectable`] or [`Movable`] and exposing them through [`Receiver`].
//! - A [`ViewTree`] hit-tests by [`Capability`], converts root-space points into
//!   a view's local space, and hosts non-interactive overlays.
//! - One [`ActionManager`] per family reads each tick's [`EventMap`], picks a
//!   target when a gesture begins, and keeps delivering to it until the
//!   gesture ends. [`GestureTarget`] holds that non-owning handle and drops it
//!   if the view goes away mid-gesture.
//! - A [`Sender`] owns the [`EventMap`], the [`Catalog`](understory_quasimode::Catalog)
//!   and the managers, and runs one tick per raw event.
//!
//! ## Ticks
//!
//! Each raw event is recorded, the action events are resolved, every manager
//! dispatches in catalog order, and the map settles. A gesture's receiver is
//! chosen once, at its first frame; a `Began` is only dispatched if the device
//! event driving the action began on the same frame, so pressing a modifier
//! in the middle of a drag never starts a new gesture.
//!
//! ## Managers
//!
//! See [`managers`] for the standard set and the actions each owns.
//!
//! ## Features
//!
//! - `std` (default): forwards to the dependencies that support it.
//! - `libm`: `no_std` float math for `kurbo`.
//! - `view_tree_adapter`: [`ViewTree`] for `understory_view_tree::Tree`,
//!   see [`adapters`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
mod error;
mod manager;
pub mod managers;
mod receiver;
mod sender;
mod view;

#[cfg(test)]
mod testing;

pub use error::ActionError;
pub use manager::ActionManager;
pub use receiver::{
    Bindable, Capability, Copiable, CopiedObject, DisplayMode, Indicatable, Movable, Newable,
    PointEditable, Queryable, Receiver, Reference, Rotatable, Runnable, Scrollable, Selectable,
    Strokable, Transformable, Undoable, Zoomable,
};
pub use sender::Sender;
pub use view::{GestureTarget, ViewTree};

pub use understory_quasimode::{CatalogError, Error};
