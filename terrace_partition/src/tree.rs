// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: arena, splitting, queries, walks.

use alloc::{vec, vec::Vec};

use rand::Rng;
use terrace_lattice::{LatticePoint, LatticeRect, LatticeSize};

use crate::types::{NodeId, ParamsError, SplitAxis, SplitParams, TraversalOrder};

/// A rectangle in a [`SpaceTree`], plus its place in the hierarchy.
///
/// A node is either a leaf or split into exactly two children that tile its
/// area. Areas never change after creation.
#[derive(Clone, Debug)]
pub struct Node<P> {
    generation: u32,
    area: LatticeRect,
    level: u32,
    parent: Option<NodeId>,
    split: Option<Split>,
    payload: P,
}

#[derive(Copy, Clone, Debug)]
struct Split {
    axis: SplitAxis,
    offset: i32,
    children: [NodeId; 2],
}

impl<P> Node<P> {
    /// The rectangle covered by this node.
    pub fn area(&self) -> LatticeRect {
        self.area
    }

    /// Depth below the root; the root is level 0.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The two children, first (left or top) then second.
    pub fn children(&self) -> Option<[NodeId; 2]> {
        self.split.map(|s| s.children)
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.split.is_none()
    }

    /// Direction and position (relative to the node's origin) of the cut.
    pub fn split(&self) -> Option<(SplitAxis, i32)> {
        self.split.map(|s| (s.axis, s.offset))
    }

    /// Caller data attached to the node.
    pub fn payload(&self) -> &P {
        &self.payload
    }
}

/// Random binary space partition of an integer rectangle.
///
/// Nodes live in an arena addressed by generational [`NodeId`]s. The root
/// always exists; the only removal is [`SpaceTree::remove_children`], which
/// frees both subtrees of a node at once.
///
/// `P` is per-node caller data (room descriptors, region tags, ...). New
/// children start with `P::default()`.
///
/// ## Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use terrace_lattice::{LatticePoint, LatticeRect, LatticeSize};
/// use terrace_partition::{SpaceTree, SplitParams};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let params = SplitParams::new(10, LatticeSize::splat(1), LatticeSize::splat(2), 1.5);
/// let tree: SpaceTree = SpaceTree::generate(LatticeRect::from_xywh(0, 0, 4, 4), &mut rng, &params)
///     .unwrap();
///
/// assert_eq!(tree.leaves().len(), 4);
/// let leaf = tree.find(LatticePoint::new(3, 0)).unwrap();
/// assert_eq!(tree.area(leaf).unwrap().size, LatticeSize::new(2, 2));
/// ```
#[derive(Clone)]
pub struct SpaceTree<P = ()> {
    /// slots
    nodes: Vec<Option<Node<P>>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    len: usize,
}

impl<P> core::fmt::Debug for SpaceTree<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpaceTree")
            .field("area", &self.area(self.root))
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &self.len)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

/// Axis and bounds of a split that passed the size checks.
struct SplitPlan {
    axis: SplitAxis,
    dim: i32,
    min: i32,
}

impl SplitPlan {
    /// Offsets that keep both children at least `min` wide along the axis.
    ///
    /// With `max`, and when the dimension allows it, the range is narrowed
    /// further so both children are also at most `max` wide.
    fn offsets(&self, max: Option<i32>) -> (i32, i32) {
        let (lo, hi) = (self.min, self.dim - self.min);
        if let Some(max) = max {
            if i64::from(self.dim) <= 2 * i64::from(max) {
                let (lo_fit, hi_fit) = (lo.max(self.dim - max), hi.min(max));
                if lo_fit <= hi_fit {
                    return (lo_fit, hi_fit);
                }
            }
        }
        (lo, hi)
    }
}

fn choose_axis<R: Rng + ?Sized>(size: LatticeSize, max_ratio: f64, rng: &mut R) -> SplitAxis {
    let (w, h) = (f64::from(size.width), f64::from(size.height));
    if w >= max_ratio * h {
        SplitAxis::Vertical
    } else if h >= max_ratio * w {
        SplitAxis::Horizontal
    } else if rng.random_bool(0.5) {
        SplitAxis::Vertical
    } else {
        SplitAxis::Horizontal
    }
}

fn along(axis: SplitAxis, size: LatticeSize) -> i32 {
    match axis {
        SplitAxis::Vertical => size.width,
        SplitAxis::Horizontal => size.height,
    }
}

impl<P: Default> SpaceTree<P> {
    /// Create a tree whose root covers `area`.
    pub fn new(area: LatticeRect) -> Self {
        Self::with_payload(area, P::default())
    }

    /// Build a whole tree by recursively splitting `area`.
    pub fn generate<R: Rng + ?Sized>(
        area: LatticeRect,
        rng: &mut R,
        params: &SplitParams,
    ) -> Result<Self, ParamsError> {
        params.validate()?;
        let mut tree = Self::new(area);
        let splits = tree.split_recursive(
            tree.root,
            rng,
            params.level_max,
            params.min_size,
            params.max_size,
            params.max_ratio,
        );
        tracing::debug!(
            width = area.width(),
            height = area.height(),
            splits,
            nodes = tree.len(),
            "generated space partition"
        );
        Ok(tree)
    }

    /// Split a leaf once along an axis chosen from its aspect ratio.
    ///
    /// The cut is vertical when `width >= max_ratio * height`, horizontal when
    /// `height >= max_ratio * width`, and a coin flip otherwise. The offset is
    /// uniform in `[min, dim - min]` along the axis. Returns `false`, leaving
    /// the node as it was, when the node is dead or already split, or when
    /// the dimension along the axis is not larger than `2 * min`. Minimum
    /// extents below one cell count as one.
    pub fn split_once<R: Rng + ?Sized>(
        &mut self,
        id: NodeId,
        rng: &mut R,
        min_size: LatticeSize,
        max_ratio: f64,
    ) -> bool {
        let Some(plan) = self.plan(id, rng, min_size, max_ratio) else {
            return false;
        };
        let (lo, hi) = plan.offsets(None);
        let offset = rng.random_range(lo..=hi);
        self.split_at(id, plan.axis, offset)
    }

    /// Split `id` and its descendants until they fit `max_size` or reach
    /// `level_max`.
    ///
    /// Nodes that are already split are descended into. A node whose split
    /// is rejected stays a leaf. When one step can bring both children within
    /// `max_size` along the split axis, the offset is drawn from that range
    /// only. Returns the number of splits performed.
    pub fn split_recursive<R: Rng + ?Sized>(
        &mut self,
        id: NodeId,
        rng: &mut R,
        level_max: u32,
        min_size: LatticeSize,
        max_size: LatticeSize,
        max_ratio: f64,
    ) -> usize {
        let mut splits = 0;
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            if let Some([first, second]) = node.children() {
                stack.push(second);
                stack.push(first);
                continue;
            }
            if node.level >= level_max || node.area.size.fits_within(max_size) {
                continue;
            }
            let Some(plan) = self.plan(id, rng, min_size, max_ratio) else {
                continue;
            };
            let (lo, hi) = plan.offsets(Some(along(plan.axis, max_size)));
            let offset = rng.random_range(lo..=hi);
            if self.split_at(id, plan.axis, offset) {
                splits += 1;
                stack.push(id);
            }
        }
        splits
    }

    /// Split a leaf at a fixed position.
    ///
    /// `offset` is measured from the node's left (vertical cut) or top
    /// (horizontal cut) edge and must leave both children non-empty.
    pub fn split_at(&mut self, id: NodeId, axis: SplitAxis, offset: i32) -> bool {
        let (area, level) = match self.node(id) {
            Some(n) if n.is_leaf() => (n.area, n.level),
            _ => return false,
        };
        if offset <= 0 || offset >= along(axis, area.size) {
            return false;
        }
        let (a, b) = match axis {
            SplitAxis::Vertical => area.split_vertical(offset),
            SplitAxis::Horizontal => area.split_horizontal(offset),
        };
        let level = level.saturating_add(1);
        let first = self.alloc(a, level, Some(id), P::default());
        let second = self.alloc(b, level, Some(id), P::default());
        if let Some(node) = self.node_mut(id) {
            node.split = Some(Split {
                axis,
                offset,
                children: [first, second],
            });
        }
        tracing::trace!(?axis, offset, level, "split node");
        true
    }

    fn plan<R: Rng + ?Sized>(
        &self,
        id: NodeId,
        rng: &mut R,
        min_size: LatticeSize,
        max_ratio: f64,
    ) -> Option<SplitPlan> {
        let node = self.node(id)?;
        if !node.is_leaf() {
            return None;
        }
        let axis = choose_axis(node.area.size, max_ratio, rng);
        let dim = along(axis, node.area.size);
        let min = along(axis, min_size).max(1);
        if i64::from(dim) <= 2 * i64::from(min) {
            return None;
        }
        Some(SplitPlan { axis, dim, min })
    }
}

impl<P> SpaceTree<P> {
    /// Create a tree whose root covers `area` and carries `payload`.
    pub fn with_payload(area: LatticeRect, payload: P) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
            len: 0,
        };
        tree.root = tree.alloc(area, 0, None, payload);
        tree
    }

    fn alloc(&mut self, area: LatticeRect, level: u32, parent: Option<NodeId>, payload: P) -> NodeId {
        let mut node = Node {
            generation: 1,
            area,
            level,
            parent,
            split: None,
            payload,
        };
        self.len += 1;
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            node.generation = generation;
            self.nodes[idx] = Some(node);
            (idx, generation)
        } else {
            self.nodes.push(Some(node));
            self.generations.push(1);
            (self.nodes.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let idx = idx as u32;
        NodeId::new(idx, generation)
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// The node behind `id`, if it is alive.
    pub fn node(&self, id: NodeId) -> Option<&Node<P>> {
        self.nodes
            .get(id.idx())?
            .as_ref()
            .filter(|n| n.generation == id.1)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<P>> {
        self.nodes
            .get_mut(id.idx())?
            .as_mut()
            .filter(|n| n.generation == id.1)
    }

    /// Area of a live node.
    pub fn area(&self, id: NodeId) -> Option<LatticeRect> {
        self.node(id).map(Node::area)
    }

    /// Level of a live node.
    pub fn level(&self, id: NodeId) -> Option<u32> {
        self.node(id).map(Node::level)
    }

    /// Parent of a live node; `None` for the root and for dead ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Children of a live, split node.
    pub fn children(&self, id: NodeId) -> Option<[NodeId; 2]> {
        self.node(id).and_then(Node::children)
    }

    /// Whether `id` is a live leaf.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_leaf)
    }

    /// Payload of a live node.
    pub fn payload(&self, id: NodeId) -> Option<&P> {
        self.node(id).map(Node::payload)
    }

    /// Mutable payload of a live node.
    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut P> {
        self.node_mut(id).map(|n| &mut n.payload)
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: the root cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Leaves from left/top to right/bottom (pre-order).
    pub fn leaves(&self) -> Vec<NodeId> {
        self.ordered(TraversalOrder::PreOrder)
            .into_iter()
            .filter(|&id| self.is_leaf(id))
            .collect()
    }

    /// The deepest node containing `point`, `None` outside the root.
    pub fn find(&self, point: LatticePoint) -> Option<NodeId> {
        let mut current = self.root;
        if !self.node(current)?.area.contains(point) {
            return None;
        }
        while let Some(children) = self.children(current) {
            current = children
                .into_iter()
                .find(|&c| self.area(c).is_some_and(|a| a.contains(point)))?;
        }
        Some(current)
    }

    /// Free both subtrees of `id`, turning it back into a leaf.
    ///
    /// Ids of the removed nodes go stale. Returns `false` if `id` is dead or
    /// already a leaf.
    pub fn remove_children(&mut self, id: NodeId) -> bool {
        let Some(children) = self.children(id) else {
            return false;
        };
        let mut stack = Vec::from(children);
        while let Some(c) = stack.pop() {
            if let Some(grandchildren) = self.children(c) {
                stack.extend(grandchildren);
            }
            if self.is_alive(c) {
                self.nodes[c.idx()] = None;
                self.free_list.push(c.idx());
                self.len -= 1;
            }
        }
        if let Some(node) = self.node_mut(id) {
            node.split = None;
        }
        true
    }

    /// Visit every node in `order` until `f` returns `false`.
    ///
    /// Returns `true` if the walk completed.
    pub fn walk<F>(&self, order: TraversalOrder, mut f: F) -> bool
    where
        F: FnMut(NodeId, &Node<P>) -> bool,
    {
        for id in self.ordered(order) {
            if let Some(node) = self.node(id) {
                if !f(id, node) {
                    return false;
                }
            }
        }
        true
    }

    /// [`SpaceTree::walk`] in [`TraversalOrder::PreOrder`].
    pub fn walk_pre_order<F>(&self, f: F) -> bool
    where
        F: FnMut(NodeId, &Node<P>) -> bool,
    {
        self.walk(TraversalOrder::PreOrder, f)
    }

    /// [`SpaceTree::walk`] in [`TraversalOrder::InOrder`].
    pub fn walk_in_order<F>(&self, f: F) -> bool
    where
        F: FnMut(NodeId, &Node<P>) -> bool,
    {
        self.walk(TraversalOrder::InOrder, f)
    }

    /// [`SpaceTree::walk`] in [`TraversalOrder::PostOrder`].
    pub fn walk_post_order<F>(&self, f: F) -> bool
    where
        F: FnMut(NodeId, &Node<P>) -> bool,
    {
        self.walk(TraversalOrder::PostOrder, f)
    }

    /// [`SpaceTree::walk`] in [`TraversalOrder::LevelOrder`].
    pub fn walk_level_order<F>(&self, f: F) -> bool
    where
        F: FnMut(NodeId, &Node<P>) -> bool,
    {
        self.walk(TraversalOrder::LevelOrder, f)
    }

    /// [`SpaceTree::walk`] in [`TraversalOrder::InvertedLevelOrder`].
    pub fn walk_inverted_level_order<F>(&self, f: F) -> bool
    where
        F: FnMut(NodeId, &Node<P>) -> bool,
    {
        self.walk(TraversalOrder::InvertedLevelOrder, f)
    }

    fn ordered(&self, order: TraversalOrder) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.len);
        match order {
            TraversalOrder::PreOrder => {
                let mut stack = vec![self.root];
                while let Some(id) = stack.pop() {
                    out.push(id);
                    if let Some([first, second]) = self.children(id) {
                        stack.push(second);
                        stack.push(first);
                    }
                }
            }
            TraversalOrder::InOrder => {
                let mut stack = Vec::new();
                let mut current = Some(self.root);
                loop {
                    while let Some(id) = current {
                        stack.push(id);
                        current = self.children(id).map(|[first, _]| first);
                    }
                    let Some(id) = stack.pop() else {
                        break;
                    };
                    out.push(id);
                    current = self.children(id).map(|[_, second]| second);
                }
            }
            TraversalOrder::PostOrder => {
                // Reverse of node, second subtree, first subtree.
                let mut stack = vec![self.root];
                while let Some(id) = stack.pop() {
                    out.push(id);
                    if let Some([first, second]) = self.children(id) {
                        stack.push(first);
                        stack.push(second);
                    }
                }
                out.reverse();
            }
            TraversalOrder::LevelOrder | TraversalOrder::InvertedLevelOrder => {
                out.push(self.root);
                let mut head = 0;
                while let Some(&id) = out.get(head) {
                    if let Some(children) = self.children(id) {
                        out.extend(children);
                    }
                    head += 1;
                }
                if order == TraversalOrder::InvertedLevelOrder {
                    out.reverse();
                }
            }
        }
        out
    }
}
