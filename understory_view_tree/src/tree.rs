// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries.

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect};

use crate::types::{Capabilities, LocalNode, NodeFlags, NodeId};

/// A hierarchy of views, each with local geometry and an optional payload.
///
/// The payload `R` is whatever the host attaches to a view, typically the
/// object that receives actions. Nodes without a payload (overlays, plain
/// containers) still take part in geometry.
///
/// World-space data is derived on demand from the chain of local transforms,
/// so updates take effect immediately.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Affine, Point, Rect};
/// use understory_view_tree::{Capabilities, LocalNode, Tree};
///
/// let mut tree: Tree<&str> = Tree::new();
/// let canvas = tree.insert(
///     None,
///     LocalNode {
///         local_bounds: Rect::new(0.0, 0.0, 400.0, 300.0),
///         capabilities: Capabilities::SELECTABLE | Capabilities::ZOOMABLE,
///         ..LocalNode::default()
///     },
///     Some("canvas"),
/// );
/// let shape = tree.insert(
///     Some(canvas),
///     LocalNode {
///         local_bounds: Rect::new(0.0, 0.0, 50.0, 50.0),
///         local_transform: Affine::translate((100.0, 100.0)),
///         capabilities: Capabilities::MOVABLE,
///         ..LocalNode::default()
///     },
///     Some("shape"),
/// );
///
/// let at = Point::new(110.0, 120.0);
/// assert_eq!(tree.locate(at, Capabilities::MOVABLE), Some(shape));
/// assert_eq!(tree.locate(at, Capabilities::SELECTABLE), Some(canvas));
/// assert_eq!(tree.convert_from_root(shape, at), Some(Point::new(10.0, 20.0)));
/// ```
pub struct Tree<R> {
    slots: Vec<Slot<R>>,
    vacant: Vec<usize>,
}

impl<R> core::fmt::Debug for Tree<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let live = self.slots.len() - self.vacant.len();
        f.debug_struct("Tree")
            .field("slots", &self.slots.len())
            .field("live", &live)
            .finish_non_exhaustive()
    }
}

impl<R> Default for Tree<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched node.
    pub node: NodeId,
    /// Path from root to node (inclusive).
    pub path: Vec<NodeId>,
}

/// Filters applied during hit testing.
#[derive(Clone, Copy, Debug)]
pub struct QueryFilter {
    /// Only nodes containing all these flags are included. `VISIBLE` is also
    /// required of every ancestor.
    pub required_flags: NodeFlags,
    /// Only nodes offering all these capabilities are included.
    pub required_capabilities: Capabilities,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            required_flags: NodeFlags::empty(),
            required_capabilities: Capabilities::empty(),
        }
    }
}

impl QueryFilter {
    /// Create a new empty filter (includes all nodes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter to only visible nodes.
    pub fn visible(mut self) -> Self {
        self.required_flags |= NodeFlags::VISIBLE;
        self
    }

    /// Filter to only pickable nodes.
    pub fn pickable(mut self) -> Self {
        self.required_flags |= NodeFlags::PICKABLE;
        self
    }

    /// Filter to nodes offering `capabilities`.
    pub fn capable(mut self, capabilities: Capabilities) -> Self {
        self.required_capabilities |= capabilities;
        self
    }

    /// Check if a node's local data satisfies this filter.
    pub fn matches(&self, local: &LocalNode) -> bool {
        local.flags.contains(self.required_flags)
            && local.capabilities.contains(self.required_capabilities)
    }
}

/// One arena slot. The generation outlives the node so stale ids stay stale
/// after the slot is reused.
#[derive(Clone, Debug)]
struct Slot<R> {
    generation: u32,
    node: Option<Node<R>>,
}

#[derive(Clone, Debug)]
struct Node<R> {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
    payload: Option<R>,
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "View ids are 32-bit; a tree never holds 2^32 views."
)]
fn id_at(idx: usize, generation: u32) -> NodeId {
    NodeId::new(idx as u32, generation)
}

impl<R> Tree<R> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
        }
    }

    /// Insert a view under `parent`, or as a root when `parent` is `None`.
    ///
    /// A stale `parent` inserts the node as a root.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode, payload: Option<R>) -> NodeId {
        let node = Node {
            parent: None,
            children: Vec::new(),
            local,
            payload,
        };
        let id = match self.vacant.pop() {
            Some(idx) => {
                let slot = &mut self.slots[idx];
                slot.generation = slot.generation.wrapping_add(1).max(1);
                slot.node = Some(node);
                id_at(idx, slot.generation)
            }
            None => {
                self.slots.push(Slot {
                    generation: 1,
                    node: Some(node),
                });
                id_at(self.slots.len() - 1, 1)
            }
        };
        match parent {
            Some(p) if self.is_alive(p) => self.link_parent(id, p),
            Some(p) => tracing::debug!(?p, "insert under stale parent; inserting as root"),
            None => {}
        }
        id
    }

    /// Remove a node (and its subtree) from the tree.
    ///
    /// Ids of removed nodes become stale immediately.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            tracing::trace!(?id, "remove of stale id ignored");
            return;
        }
        if let Some(parent) = self.node(id).and_then(|n| n.parent) {
            self.unlink_parent(id, parent);
        }
        let mut stack = alloc::vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.slots[current.idx()].node.take() {
                stack.extend(node.children);
                self.vacant.push(current.idx());
            }
        }
    }

    /// Update local transform.
    pub fn set_local_transform(&mut self, id: NodeId, tf: Affine) {
        if let Some(n) = self.node_mut(id) {
            n.local.local_transform = tf;
        }
    }

    /// Update local bounds.
    pub fn set_local_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.node_mut(id) {
            n.local.local_bounds = bounds;
        }
    }

    /// Update z index.
    pub fn set_z_index(&mut self, id: NodeId, z: i32) {
        if let Some(n) = self.node_mut(id) {
            n.local.z_index = z;
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Update capabilities.
    pub fn set_capabilities(&mut self, id: NodeId, capabilities: Capabilities) {
        if let Some(n) = self.node_mut(id) {
            n.local.capabilities = capabilities;
        }
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Local data of a live node.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.node(id).map(|n| &n.local)
    }

    /// Returns the z-index of a node if the identifier is live.
    pub fn z_index(&self, id: NodeId) -> Option<i32> {
        self.node(id).map(|n| n.local.z_index)
    }

    /// Returns the flags of a node if the identifier is live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node(id).map(|n| n.local.flags)
    }

    /// Returns the capabilities of a node if the identifier is live.
    pub fn capabilities(&self, id: NodeId) -> Option<Capabilities> {
        self.node(id).map(|n| n.local.capabilities)
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Payload of a live node.
    pub fn payload(&self, id: NodeId) -> Option<&R> {
        self.node(id).and_then(|n| n.payload.as_ref())
    }

    /// Mutable payload of a live node.
    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut R> {
        self.node_mut(id).and_then(|n| n.payload.as_mut())
    }

    /// Return the local→root transform of a live node.
    pub fn world_transform(&self, id: NodeId) -> Option<Affine> {
        let mut node = self.node(id)?;
        let mut tf = node.local.local_transform;
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            tf = node.local.local_transform * tf;
        }
        Some(tf)
    }

    /// Return a root-space axis-aligned box containing the node's local bounds.
    ///
    /// Loose under rotation or shear.
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        let local = self.node(id)?.local.local_bounds;
        Some(self.world_transform(id)?.transform_rect_bbox(local))
    }

    /// Convert a root-space point into the local space of `id`.
    pub fn convert_from_root(&self, id: NodeId, point: Point) -> Option<Point> {
        Some(self.world_transform(id)?.inverse() * point)
    }

    /// Convert a root-space rectangle into a local-space axis-aligned box of `id`.
    pub fn convert_rect_from_root(&self, id: NodeId, rect: Rect) -> Option<Rect> {
        Some(self.world_transform(id)?.inverse().transform_rect_bbox(rect))
    }

    /// Hit test a root-space point and, if any node matches, return the
    /// front-most node and its path to root as a [`Hit`].
    ///
    /// - Nodes must satisfy the [`QueryFilter`] and contain the point within
    ///   their local bounds to be eligible.
    /// - Among candidates, higher `z_index` wins; if `z_index` ties, deeper nodes
    ///   in the tree win; if that also ties, the newer [`NodeId`] wins.
    pub fn hit_test_point(&self, point: Point, filter: QueryFilter) -> Option<Hit> {
        let mut best: Option<(NodeId, i32, Vec<NodeId>)> = None;
        let mut path_buf: Vec<NodeId> = Vec::new();

        for (idx, slot) in self.slots.iter().enumerate() {
            let Some(node) = &slot.node else {
                continue;
            };
            if !filter.matches(&node.local) {
                continue;
            }
            let id = id_at(idx, slot.generation);
            let Some(tf) = self.world_transform(id) else {
                continue;
            };
            if !node.local.local_bounds.contains(tf.inverse() * point) {
                continue;
            }

            path_buf.clear();
            if !self.collect_path(id, filter, &mut path_buf) {
                continue;
            }

            let z = node.local.z_index;
            let better = match &best {
                None => true,
                Some((id_best, z_best, path_best)) => {
                    z > *z_best
                        || (z == *z_best
                            && (path_buf.len() > path_best.len()
                                || (path_buf.len() == path_best.len()
                                    && id.is_newer_than(*id_best))))
                }
            };
            if better {
                best = Some((id, z, core::mem::take(&mut path_buf)));
            }
        }

        best.map(|(node, _, mut path)| {
            // Paths are collected node to root; `Hit::path` runs root to node.
            path.reverse();
            Hit { node, path }
        })
    }

    /// Front-most visible, pickable node under `point` offering `capabilities`.
    pub fn locate(&self, point: Point, capabilities: Capabilities) -> Option<NodeId> {
        let filter = QueryFilter::new()
            .visible()
            .pickable()
            .capable(capabilities);
        self.hit_test_point(point, filter).map(|hit| hit.node)
    }

    // --- internals ---

    /// Push `id` and its ancestors onto `path`. Returns false if a hidden
    /// ancestor excludes the node under a `VISIBLE` filter.
    fn collect_path(&self, id: NodeId, filter: QueryFilter, path: &mut Vec<NodeId>) -> bool {
        let needs_visible = filter.required_flags.contains(NodeFlags::VISIBLE);
        path.push(id);
        let mut current = self.parent_of(id);
        while let Some(parent_id) = current {
            let Some(parent) = self.node(parent_id) else {
                return false;
            };
            if needs_visible && !parent.local.flags.contains(NodeFlags::VISIBLE) {
                return false;
            }
            path.push(parent_id);
            current = parent.parent;
        }
        true
    }

    fn node(&self, id: NodeId) -> Option<&Node<R>> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<R>> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_mut()
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;
    use kurbo::Vec2;

    fn boxed(bounds: Rect) -> LocalNode {
        LocalNode {
            local_bounds: bounds,
            ..Default::default()
        }
    }

    #[test]
    fn insert_and_hit_test() {
        let mut tree: Tree<()> = Tree::new();
        let root = tree.insert(None, boxed(Rect::new(0.0, 0.0, 200.0, 200.0)), None);
        let _a = tree.insert(Some(root), boxed(Rect::new(10.0, 10.0, 60.0, 60.0)), None);
        let b = tree.insert(
            Some(root),
            LocalNode {
                local_bounds: Rect::new(40.0, 40.0, 120.0, 120.0),
                z_index: 10,
                ..Default::default()
            },
            None,
        );

        let hit = tree
            .hit_test_point(
                Point::new(50.0, 50.0),
                QueryFilter::new().visible().pickable(),
            )
            .unwrap();
        assert_eq!(hit.node, b, "topmost by z should win");
        assert_eq!(hit.path.first().copied(), Some(root));
        assert_eq!(hit.path.last().copied(), Some(b));
    }

    #[test]
    fn locate_skips_nodes_without_capability() {
        let mut tree: Tree<()> = Tree::new();
        let canvas = tree.insert(
            None,
            LocalNode {
                local_bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
                capabilities: Capabilities::SELECTABLE,
                ..Default::default()
            },
            None,
        );
        let shape = tree.insert(
            Some(canvas),
            LocalNode {
                local_bounds: Rect::new(10.0, 10.0, 20.0, 20.0),
                capabilities: Capabilities::MOVABLE | Capabilities::COPIABLE,
                ..Default::default()
            },
            None,
        );
        let p = Point::new(15.0, 15.0);
        assert_eq!(tree.locate(p, Capabilities::MOVABLE), Some(shape));
        assert_eq!(tree.locate(p, Capabilities::SELECTABLE), Some(canvas));
        assert_eq!(
            tree.locate(p, Capabilities::MOVABLE | Capabilities::SELECTABLE),
            None
        );
        assert_eq!(tree.locate(Point::new(50.0, 50.0), Capabilities::MOVABLE), None);
    }

    #[test]
    fn unpickable_and_hidden_nodes_are_not_located() {
        let mut tree: Tree<()> = Tree::new();
        let all = Capabilities::all();
        let hidden_parent = tree.insert(
            None,
            LocalNode {
                local_bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
                flags: NodeFlags::PICKABLE,
                ..Default::default()
            },
            None,
        );
        let _child = tree.insert(
            Some(hidden_parent),
            LocalNode {
                local_bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
                capabilities: all,
                ..Default::default()
            },
            None,
        );
        let overlay = tree.insert(
            None,
            LocalNode {
                local_bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
                flags: NodeFlags::VISIBLE,
                capabilities: all,
                z_index: 5,
                ..Default::default()
            },
            None,
        );
        assert_eq!(tree.locate(Point::new(5.0, 5.0), all), None);

        // Without the visible/pickable requirements both are eligible.
        let hit = tree
            .hit_test_point(Point::new(5.0, 5.0), QueryFilter::new().capable(all))
            .unwrap();
        assert_eq!(hit.node, overlay);
    }

    #[test]
    fn deeper_node_wins_over_ancestor_at_equal_z() {
        let mut tree: Tree<()> = Tree::new();
        let root = tree.insert(None, boxed(Rect::new(0.0, 0.0, 100.0, 100.0)), None);
        let child = tree.insert(Some(root), boxed(Rect::new(0.0, 0.0, 50.0, 50.0)), None);
        let grandchild = tree.insert(Some(child), boxed(Rect::new(0.0, 0.0, 25.0, 25.0)), None);
        let filter = QueryFilter::new();
        assert_eq!(
            tree.hit_test_point(Point::new(10.0, 10.0), filter).unwrap().node,
            grandchild
        );
        assert_eq!(
            tree.hit_test_point(Point::new(40.0, 40.0), filter).unwrap().node,
            child
        );
        assert_eq!(
            tree.hit_test_point(Point::new(10.0, 10.0), filter).unwrap().path,
            [root, child, grandchild]
        );
    }

    #[test]
    fn hit_equal_z_and_depth_newer_wins() {
        let mut tree: Tree<()> = Tree::new();
        let a = tree.insert(None, boxed(Rect::new(0.0, 0.0, 10.0, 10.0)), None);
        let b = tree.insert(None, boxed(Rect::new(0.0, 0.0, 10.0, 10.0)), None);
        let p = Point::new(5.0, 5.0);
        assert_eq!(tree.hit_test_point(p, QueryFilter::new()).unwrap().node, b);

        // Reusing a's slot bumps its generation, making it the newest.
        tree.remove(a);
        let c = tree.insert(None, boxed(Rect::new(0.0, 0.0, 10.0, 10.0)), None);
        assert_eq!(c.idx(), a.idx());
        assert_eq!(tree.hit_test_point(p, QueryFilter::new()).unwrap().node, c);
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree: Tree<u32> = Tree::new();
        let root = tree.insert(None, boxed(Rect::new(0.0, 0.0, 10.0, 10.0)), Some(1));
        let child = tree.insert(Some(root), boxed(Rect::new(0.0, 0.0, 5.0, 5.0)), Some(2));
        assert!(tree.is_alive(child));
        assert_eq!(tree.children_of(root), &[child]);

        tree.remove(root);
        assert!(!tree.is_alive(root));
        assert!(!tree.is_alive(child), "subtree is removed with its root");
        assert_eq!(tree.payload(child), None);
        assert!(tree.children_of(root).is_empty());

        let reused = tree.insert(None, boxed(Rect::new(0.0, 0.0, 1.0, 1.0)), Some(3));
        assert!(tree.is_alive(reused));
        assert_ne!(reused, root);
        assert_ne!(reused, child);
        assert_eq!(tree.payload(reused), Some(&3));
    }

    #[test]
    fn remove_unlinks_from_parent() {
        let mut tree: Tree<()> = Tree::new();
        let root = tree.insert(None, boxed(Rect::new(0.0, 0.0, 10.0, 10.0)), None);
        let a = tree.insert(Some(root), boxed(Rect::ZERO), None);
        let b = tree.insert(Some(root), boxed(Rect::ZERO), None);
        tree.remove(a);
        assert_eq!(tree.children_of(root), &[b]);
        assert_eq!(tree.parent_of(b), Some(root));
        assert_eq!(tree.parent_of(a), None);
        // Removing again is a no-op.
        tree.remove(a);
        assert_eq!(tree.children_of(root), &[b]);
    }

    #[test]
    fn stale_parent_inserts_root() {
        let mut tree: Tree<()> = Tree::new();
        let gone = tree.insert(None, boxed(Rect::ZERO), None);
        tree.remove(gone);
        let n = tree.insert(Some(gone), boxed(Rect::ZERO), None);
        assert_eq!(tree.parent_of(n), None);
    }

    #[test]
    fn convert_from_root_inverts_nested_transforms() {
        let mut tree: Tree<()> = Tree::new();
        let root = tree.insert(
            None,
            LocalNode {
                local_bounds: Rect::new(0.0, 0.0, 1000.0, 1000.0),
                local_transform: Affine::translate(Vec2::new(100.0, 50.0)),
                ..Default::default()
            },
            None,
        );
        let child = tree.insert(
            Some(root),
            LocalNode {
                local_bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
                local_transform: Affine::scale(2.0),
                ..Default::default()
            },
            None,
        );
        let p = tree.convert_from_root(child, Point::new(120.0, 70.0)).unwrap();
        assert!((p - Point::new(10.0, 10.0)).hypot() < 1e-9);
        assert_eq!(
            tree.world_bounds(child),
            Some(Rect::new(100.0, 50.0, 300.0, 250.0))
        );

        let r = tree
            .convert_rect_from_root(child, Rect::new(100.0, 50.0, 140.0, 90.0))
            .unwrap();
        assert_eq!(r, Rect::new(0.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn rotated_node_hit_uses_local_bounds() {
        let mut tree: Tree<()> = Tree::new();
        let n = tree.insert(
            None,
            LocalNode {
                local_bounds: Rect::new(0.0, 0.0, 100.0, 10.0),
                local_transform: Affine::rotate(FRAC_PI_2),
                ..Default::default()
            },
            None,
        );
        // Rotated a quarter turn the strip covers x in -10..0, y in 0..100.
        let filter = QueryFilter::new();
        assert_eq!(
            tree.hit_test_point(Point::new(-5.0, 50.0), filter).map(|h| h.node),
            Some(n)
        );
        assert!(tree.hit_test_point(Point::new(50.0, 5.0), filter).is_none());
    }

    #[test]
    fn setters_respect_liveness() {
        let mut tree: Tree<i32> = Tree::new();
        let n = tree.insert(None, boxed(Rect::new(0.0, 0.0, 10.0, 10.0)), Some(7));
        tree.set_local_bounds(n, Rect::new(0.0, 0.0, 20.0, 20.0));
        tree.set_z_index(n, 3);
        tree.set_capabilities(n, Capabilities::RUNNABLE);
        *tree.payload_mut(n).unwrap() += 1;
        assert_eq!(tree.z_index(n), Some(3));
        assert_eq!(tree.capabilities(n), Some(Capabilities::RUNNABLE));
        assert_eq!(tree.payload(n), Some(&8));
        assert_eq!(tree.locate(Point::new(15.0, 15.0), Capabilities::RUNNABLE), Some(n));

        tree.remove(n);
        tree.set_z_index(n, 9);
        assert_eq!(tree.z_index(n), None);
        assert!(tree.payload_mut(n).is_none());
        assert!(tree.world_transform(n).is_none());
    }
}
