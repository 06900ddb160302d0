// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Understory crates.
//!
//! Each adapter is gated behind a feature flag so the core stays free of
//! any particular view hierarchy.
//!
//! ## Available Adapters
//!
//! - [`view_tree`] (`view_tree_adapter` feature): [`ViewTree`](crate::ViewTree)
//!   for [`understory_view_tree::Tree`] with boxed receivers as payloads.

#[cfg(feature = "view_tree_adapter")]
pub mod view_tree;
