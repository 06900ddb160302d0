// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the view tree: node identifiers, flags, capabilities, and local geometry.

use kurbo::{Affine, Rect};

/// Identifier for a node in the tree (generational).
///
/// A `NodeId` does not keep its node alive. Once the node is removed, every
/// query with the old id returns `None`, even after the slot is reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }

    /// Returns true if `self` was allocated after `other`.
    pub(crate) const fn is_newer_than(self, other: Self) -> bool {
        (self.1 > other.1) || (self.1 == other.1 && self.0 > other.0)
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible.
        const VISIBLE  = 0b0000_0001;
        /// Node is pickable (participates in hit testing).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

bitflags::bitflags! {
    /// Receiver capabilities a node advertises to hit testing.
    ///
    /// One bit per family of action: a node is only located for an action
    /// family if it sets the matching bit.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// Hover highlighting.
        const INDICATABLE    = 1 << 0;
        /// Marquee selection.
        const SELECTABLE     = 1 << 1;
        /// Binding.
        const BINDABLE       = 1 << 2;
        /// Scrolling.
        const SCROLLABLE     = 1 << 3;
        /// Zooming and view reset.
        const ZOOMABLE       = 1 << 4;
        /// View rotation.
        const ROTATABLE      = 1 << 5;
        /// Looking up references.
        const QUERYABLE      = 1 << 6;
        /// Undo and redo.
        const UNDOABLE       = 1 << 7;
        /// Copy, cut, and paste.
        const COPIABLE       = 1 << 8;
        /// Creating new objects.
        const NEWABLE        = 1 << 9;
        /// Running.
        const RUNNABLE       = 1 << 10;
        /// Moving.
        const MOVABLE        = 1 << 11;
        /// Transforming, warping and moving along z.
        const TRANSFORMABLE  = 1 << 12;
        /// Stroking and lasso erasing.
        const STROKABLE      = 1 << 13;
        /// Point and vertex editing.
        const POINT_EDITABLE = 1 << 14;
    }
}

/// Local geometry for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Local (untransformed) bounds.
    pub local_bounds: Rect,
    /// Local transform relative to parent space.
    pub local_transform: Affine,
    /// Z-order. Higher is in front.
    pub z_index: i32,
    /// Visibility and picking flags.
    pub flags: NodeFlags,
    /// Capabilities offered to hit testing.
    pub capabilities: Capabilities,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            local_bounds: Rect::ZERO,
            local_transform: Affine::IDENTITY,
            z_index: 0,
            flags: NodeFlags::default(),
            capabilities: Capabilities::empty(),
        }
    }
}
