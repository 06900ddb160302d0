// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Quasimode: resolve held input into named actions.
//!
//! A quasimode is a combination of inputs that is active only while it is
//! physically held: `command+drag` selects while the key is down, and stops the
//! moment it is released. This crate turns a stream of raw key, drag, scroll,
//! pinch, and rotate events into a stream of action events, each with its own
//! `Began`/`Changed`/`Ended` lifecycle.
//!
//! - Raw events are recorded per channel into live tables, one entry per
//!   [`EventableType`].
//! - Each [`Action`] names a [`Quasimode`]: the modifiers that must be held and
//!   the triggers that drive it.
//! - An action is hittable when every one of its types is live. When several
//!   hittable actions overlap, the more specific one wins: holding
//!   `option+drag` fires `transform`, not `move`.
//! - The composite phase is derived from the entries of the action's types, so
//!   releasing a modifier mid-gesture ends the action even though the drag
//!   continues.
//!
//! ## Where this fits
//!
//! This crate only resolves input. Routing action events to objects in a view
//! hierarchy lives in `understory_action`, which drives an [`EventMap`] once per
//! raw event.
//!
//! ## API overview
//!
//! - [`types`]: the [`Channel`]s and the table of [`EventableType`] constants.
//! - [`KeyEvent`], [`DragEvent`], [`ScrollEvent`], [`PinchEvent`],
//!   [`RotateEvent`]: per-channel payloads, unified as [`Eventable`].
//! - [`Quasimode`], [`Action`], [`ActionEvent`]: signatures, named operations,
//!   and their per-tick phase.
//! - [`catalog`]: the standard actions and the validated [`Catalog`].
//! - [`EventMap`]: live tables plus the per-tick resolution:
//!   [`EventMap::record`], [`EventMap::update_action_events`],
//!   [`EventMap::sendable_action_event`],
//!   [`EventMap::sendable_action_event_tuple`],
//!   [`EventMap::remove_ended_action_events`], and [`EventMap::settle`].
//!
//! Resolution is synchronous and single threaded; an [`EventMap`] is a plain
//! value owned by whoever feeds it events.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod action;
pub mod catalog;
mod error;
mod event;
mod event_map;
pub mod types;

pub use action::{Action, ActionEvent, Quasimode};
pub use catalog::Catalog;
pub use error::{CatalogError, Error};
pub use event::{
    ChannelEvent, DragEvent, Eventable, KeyEvent, Phase, PinchEvent, RotateEvent, ScrollEvent,
};
pub use event_map::{EventMap, SendableTuple};
pub use types::{Channel, EventableType};
