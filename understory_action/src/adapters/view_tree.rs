// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Understory View Tree.
//!
//! ## Feature
//!
//! Enable with `view_tree_adapter`.
//!
//! ## Notes
//!
//! Nodes carry their receiver as a boxed payload and advertise what it can
//! do through [`Capabilities`]. Keep the two in sync with
//! [`capabilities_of`]; hit testing only looks at the flags.
//! Overlays are root nodes drawn above everything else. They are visible but
//! never pickable and carry no receiver.

use alloc::boxed::Box;

use kurbo::{Point, Rect};
use understory_view_tree::{Capabilities, LocalNode, NodeFlags, NodeId, Tree};

use crate::receiver::{Capability, Receiver};
use crate::view::ViewTree;

/// The view tree flag for one capability.
pub fn capability_flag(capability: Capability) -> Capabilities {
    match capability {
        Capability::Indicatable => Capabilities::INDICATABLE,
        Capability::Selectable => Capabilities::SELECTABLE,
        Capability::Bindable => Capabilities::BINDABLE,
        Capability::Scrollable => Capabilities::SCROLLABLE,
        Capability::Zoomable => Capabilities::ZOOMABLE,
        Capability::Rotatable => Capabilities::ROTATABLE,
        Capability::Queryable => Capabilities::QUERYABLE,
        Capability::Undoable => Capabilities::UNDOABLE,
        Capability::Copiable => Capabilities::COPIABLE,
        Capability::Newable => Capabilities::NEWABLE,
        Capability::Runnable => Capabilities::RUNNABLE,
        Capability::Movable => Capabilities::MOVABLE,
        Capability::Transformable => Capabilities::TRANSFORMABLE,
        Capability::Strokable => Capabilities::STROKABLE,
        Capability::PointEditable => Capabilities::POINT_EDITABLE,
    }
}

/// Every capability `receiver` supports, as view tree flags.
pub fn capabilities_of(receiver: &mut dyn Receiver) -> Capabilities {
    Capability::ALL
        .iter()
        .filter(|&&c| receiver.supports(c))
        .fold(Capabilities::empty(), |acc, &c| acc | capability_flag(c))
}

impl ViewTree for Tree<Box<dyn Receiver>> {
    type Key = NodeId;

    fn locate(&self, at: Point, capability: Capability) -> Option<NodeId> {
        Tree::locate(self, at, capability_flag(capability))
    }

    fn is_alive(&self, key: NodeId) -> bool {
        Tree::is_alive(self, key)
    }

    fn convert_from_root(&self, key: NodeId, point: Point) -> Option<Point> {
        Tree::convert_from_root(self, key, point)
    }

    fn convert_rect_from_root(&self, key: NodeId, rect: Rect) -> Option<Rect> {
        Tree::convert_rect_from_root(self, key, rect)
    }

    fn receiver_mut(&mut self, key: NodeId) -> Option<&mut dyn Receiver> {
        self.payload_mut(key).map(|r| &mut **r as &mut dyn Receiver)
    }

    fn insert_overlay(&mut self, frame: Rect) -> NodeId {
        let local = LocalNode {
            local_bounds: frame,
            z_index: i32::MAX,
            flags: NodeFlags::VISIBLE,
            ..LocalNode::default()
        };
        self.insert(None, local, None)
    }

    fn set_overlay_frame(&mut self, overlay: NodeId, frame: Rect) {
        self.set_local_bounds(overlay, frame);
    }

    fn remove_overlay(&mut self, overlay: NodeId) {
        self.remove(overlay);
    }
}
