// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory View Tree: a Kurbo-native arena of views for routing input.
//!
//! - Represents a hierarchy of views with local bounds, transforms, z-order,
//!   flags, and the receiver [`Capabilities`] each view offers.
//! - Provides front-most-first hit testing, optionally restricted to views
//!   offering a capability ([`Tree::locate`]).
//! - Converts root-space points and rectangles into a view's local space.
//! - Hands out generational [`NodeId`]s that go stale when a view is removed,
//!   so holders of an id never keep a view alive.
//!
//! World-space data is computed on demand from the transform chain, so edits
//! are visible to the next query without a commit step. This suits the small,
//! interactive scenes input routing deals with; large scenes want a spatially
//! indexed tree instead.
//!
//! ## API overview
//!
//! - [`Tree`]: container managing nodes and their payloads.
//! - [`LocalNode`]: per-node local data (bounds, transform, z, flags, capabilities).
//! - [`NodeFlags`]: visibility and picking controls.
//! - [`Capabilities`]: receiver families a view takes part in.
//! - [`NodeId`]: generational handle of a node.
//! - [`QueryFilter`]: restricts hit-test results by flags and capabilities.
//!
//! Key operations:
//! - [`Tree::insert`] → [`NodeId`], and [`Tree::remove`].
//! - [`Tree::set_local_transform`] / [`Tree::set_local_bounds`] /
//!   [`Tree::set_z_index`] / [`Tree::set_flags`] / [`Tree::set_capabilities`].
//! - [`Tree::hit_test_point`] and [`Tree::locate`].
//! - [`Tree::convert_from_root`] and [`Tree::convert_rect_from_root`].
//! - [`Tree::payload`] / [`Tree::payload_mut`] to reach the object behind a view.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Hit, QueryFilter, Tree};
pub use types::{Capabilities, LocalNode, NodeFlags, NodeId};
