//! Decode tree for sequential decoding of convolutional codes
//!
//! Each node fuses a tree position with its single incoming edge. Nodes live
//! in an arena owned by [`DecodeTree`]; parents reach children through their
//! outgoing slots, children point back with a non-owning [`NodeRef`].
//!
//! Lifecycle driven by the decoder:
//!   1. [`DecodeTree::create`] / [`DecodeTree::create_child`] → [`DetachedNode`]
//!   2. fill registers and tag from the encoder/channel model
//!   3. [`DecodeTree::attach_child`] moves it under its parent
//!   4. [`DecodeTree::delete_subtree`] / [`DecodeTree::release_child`] prune
//!   5. [`DecodeTree::mark_final_path`] backtracks the winner
//!
//! A node is live iff its arena slot is occupied. Handles to deleted nodes
//! are rejected, never resolved to another node.

mod config;
mod metric;
mod node;
mod order;
mod traversal;

pub use config::{TreeConfig, MAX_INPUT_BITS};
pub use metric::Metric;
pub use node::{DecodeTreeNode, DetachedNode, NodeId, NodeRef, Symbol};
pub use order::FrontierKey;
pub use traversal::{Ancestors, DepthFirst};

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tracing::{debug, trace};

/// Result type alias for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors raised by decode-tree operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    /// Configuration rejected at construction
    #[error("invalid tree configuration: {0}")]
    InvalidConfiguration(String),

    /// Branch index outside `0..fan_out`
    #[error("branch index {index} out of range (fan-out {fan_out})")]
    BranchOutOfRange {
        /// Offending index
        index: usize,
        /// Number of branches per node
        fan_out: usize,
    },

    /// Attaching into a slot that still owns a child
    #[error("branch {index} of node {parent} is already occupied")]
    SlotOccupied {
        /// Parent node
        parent: NodeId,
        /// Occupied branch
        index: usize,
    },

    /// Handle does not refer to a live node
    #[error("node {0} is not live in this tree")]
    UnknownNode(NodeId),

    /// Handle or detached node created by another tree
    #[error("node {0} belongs to a different tree")]
    ForeignNode(NodeId),

    /// Child was created for a different parent
    #[error("node {child} was created under {found:?}, not {expected}")]
    ParentMismatch {
        /// Child being attached
        child: NodeId,
        /// Parent it is being attached to
        expected: NodeId,
        /// Parent recorded in the child
        found: Option<NodeId>,
    },

    /// Child's input symbol does not label the target branch
    #[error("child with input symbol {symbol} cannot occupy branch {index}")]
    SymbolMismatch {
        /// Target branch
        index: usize,
        /// Child's input symbol
        symbol: Symbol,
    },

    /// Child depth is not parent depth + 1
    #[error("depth mismatch: expected {expected}, found {found}")]
    DepthMismatch {
        /// Parent depth + 1
        expected: usize,
        /// Depth supplied
        found: usize,
    },

    /// Register snapshot with the wrong number of registers
    #[error("register snapshot must hold {expected} registers, got {found}")]
    RegisterWidth {
        /// Registers per node (k)
        expected: usize,
        /// Registers supplied
        found: usize,
    },

    /// Structural check failed
    #[error("tree invariant violated: {0}")]
    InvariantViolation(String),

    /// Arena already holds `u32::MAX` slots
    #[error("node arena exhausted at {0} slots")]
    CapacityExhausted(usize),
}

/// Arena slot index for the node pushed at position `len`
fn slot_index(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| TreeError::CapacityExhausted(len))
}

static NEXT_TREE_TAG: AtomicU64 = AtomicU64::new(1);

/// Arena-backed decode tree
///
/// `R` = encoder register type, `T` = per-node driver payload,
/// `M` = metric type. Single writer: the decoding run that owns the tree.
#[derive(Debug)]
pub struct DecodeTree<R = u32, T = (), M = f32> {
    config: TreeConfig,

    /// Distinguishes handles of different trees
    tag: u64,

    /// Node arena; `None` marks a free slot
    slots: Vec<Option<DecodeTreeNode<R, T, M>>>,

    /// Free slot indices for reuse
    free: Vec<u32>,

    /// Occupied slot count
    live: usize,

    /// Next id to issue
    next_id: u64,

    root: NodeRef,
}

impl<R, T, M> DecodeTree<R, T, M>
where
    R: Clone + Default,
    T: Default,
    M: Metric,
{
    /// Create a tree holding only the root (id 0, depth 0, path metric 0)
    pub fn new(config: TreeConfig) -> Result<Self> {
        Self::with_root_metric(config, M::ZERO)
    }

    /// Create a tree whose root starts at `root_metric`
    pub fn with_root_metric(config: TreeConfig, root_metric: M) -> Result<Self> {
        config.validate()?;

        let tag = NEXT_TREE_TAG.fetch_add(1, Ordering::Relaxed);
        let id = NodeId(0);
        let root_node = DecodeTreeNode::new(
            id,
            None,
            0,
            M::ZERO,
            root_metric,
            0,
            config.fan_out(),
            config.register_count(),
        );

        let mut slots = Vec::with_capacity(config.capacity.max(1));
        slots.push(Some(root_node));

        Ok(Self {
            config,
            tag,
            slots,
            free: Vec::new(),
            live: 1,
            next_id: 1,
            root: NodeRef { tree: tag, slot: 0, id },
        })
    }

    /// Create a node below `incoming`, not yet attached
    ///
    /// `depth` must equal the parent depth + 1. `path_metric` is taken as
    /// given; keeping it equal to parent path + edge metric is the caller's
    /// job (see [`DecodeTree::verify`]).
    pub fn create(
        &mut self,
        incoming: NodeRef,
        in_symbol: Symbol,
        incoming_edge_metric: M,
        path_metric: M,
        depth: usize,
    ) -> Result<DetachedNode<R, T, M>> {
        let parent_depth = self.node(incoming)?.depth();
        let fan_out = self.fan_out();

        if in_symbol as usize >= fan_out {
            return Err(TreeError::BranchOutOfRange {
                index: in_symbol as usize,
                fan_out,
            });
        }
        if depth != parent_depth + 1 {
            return Err(TreeError::DepthMismatch {
                expected: parent_depth + 1,
                found: depth,
            });
        }

        let id = NodeId(self.next_id);
        self.next_id += 1;

        Ok(DetachedNode {
            tree: self.tag,
            node: DecodeTreeNode::new(
                id,
                Some(incoming),
                in_symbol,
                incoming_edge_metric,
                path_metric,
                depth,
                fan_out,
                self.config.register_count(),
            ),
        })
    }

    /// Create a node below `parent`, deriving path metric and depth
    pub fn create_child(
        &mut self,
        parent: NodeRef,
        in_symbol: Symbol,
        incoming_edge_metric: M,
    ) -> Result<DetachedNode<R, T, M>> {
        let (path_metric, depth) = {
            let node = self.node(parent)?;
            (node.path_metric() + incoming_edge_metric, node.depth() + 1)
        };
        self.create(parent, in_symbol, incoming_edge_metric, path_metric, depth)
    }

    /// Store `child` in `parent`'s outgoing slot `branch_index`
    ///
    /// Fails without touching the tree if the index is out of range, the
    /// slot is occupied, or the child was created for another parent,
    /// branch, depth or tree. Release an occupied slot first with
    /// [`DecodeTree::release_child`].
    pub fn attach_child(
        &mut self,
        parent: NodeRef,
        branch_index: usize,
        child: DetachedNode<R, T, M>,
    ) -> Result<NodeRef> {
        let fan_out = self.fan_out();
        if branch_index >= fan_out {
            return Err(TreeError::BranchOutOfRange {
                index: branch_index,
                fan_out,
            });
        }

        let child_id = child.node.id();
        if child.tree != self.tag {
            return Err(TreeError::ForeignNode(child_id));
        }

        let parent_node = self.node(parent)?;
        if child.node.incoming() != Some(parent) {
            return Err(TreeError::ParentMismatch {
                child: child_id,
                expected: parent.id,
                found: child.node.incoming().map(|r| r.id),
            });
        }
        if child.node.in_symbol() as usize != branch_index {
            return Err(TreeError::SymbolMismatch {
                index: branch_index,
                symbol: child.node.in_symbol(),
            });
        }
        if child.node.depth() != parent_node.depth() + 1 {
            return Err(TreeError::DepthMismatch {
                expected: parent_node.depth() + 1,
                found: child.node.depth(),
            });
        }
        if parent_node.outgoing()[branch_index].is_some() {
            return Err(TreeError::SlotOccupied {
                parent: parent.id,
                index: branch_index,
            });
        }

        let slot = self.allocate(child.node)?;
        let child_ref = NodeRef {
            tree: self.tag,
            slot,
            id: child_id,
        };
        if let Some(parent_node) = self.slots[parent.slot()].as_mut() {
            parent_node.set_outgoing(branch_index, Some(child_ref));
        }

        trace!(parent = %parent.id, branch = branch_index, child = %child_id, "attached child");
        Ok(child_ref)
    }

    /// Create and attach a child on branch `in_symbol` in one step
    pub fn extend(
        &mut self,
        parent: NodeRef,
        in_symbol: Symbol,
        incoming_edge_metric: M,
    ) -> Result<NodeRef> {
        let child = self.create_child(parent, in_symbol, incoming_edge_metric)?;
        self.attach_child(parent, in_symbol as usize, child)
    }

    fn allocate(&mut self, node: DecodeTreeNode<R, T, M>) -> Result<u32> {
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot as usize] = Some(node);
                slot
            }
            None => {
                let slot = slot_index(self.slots.len())?;
                self.slots.push(Some(node));
                slot
            }
        };
        self.live += 1;
        Ok(slot)
    }
}

impl<R, T, M: Metric> DecodeTree<R, T, M> {
    /// Tree configuration
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Branches per node (`2^k`)
    #[inline]
    pub fn fan_out(&self) -> usize {
        self.config.fan_out()
    }

    /// Root handle
    #[inline]
    pub fn root(&self) -> NodeRef {
        self.root
    }

    /// Number of live nodes, root included
    #[inline]
    pub fn live_nodes(&self) -> usize {
        self.live
    }

    /// Whether `node` refers to a live node of this tree
    pub fn contains(&self, node: NodeRef) -> bool {
        self.get(node).is_some()
    }

    /// Look up a live node
    pub fn get(&self, node: NodeRef) -> Option<&DecodeTreeNode<R, T, M>> {
        if node.tree != self.tag {
            return None;
        }
        self.slots
            .get(node.slot())
            .and_then(Option::as_ref)
            .filter(|n| n.id() == node.id)
    }

    /// Mutable lookup of a live node
    pub(crate) fn get_mut(&mut self, node: NodeRef) -> Option<&mut DecodeTreeNode<R, T, M>> {
        if node.tree != self.tag {
            return None;
        }
        self.slots
            .get_mut(node.slot())
            .and_then(Option::as_mut)
            .filter(|n| n.id() == node.id)
    }

    /// Look up a live node, failing on stale or foreign handles
    pub fn node(&self, node: NodeRef) -> Result<&DecodeTreeNode<R, T, M>> {
        if node.tree != self.tag {
            return Err(TreeError::ForeignNode(node.id));
        }
        self.get(node).ok_or(TreeError::UnknownNode(node.id))
    }

    /// Mutable variant of [`DecodeTree::node`]
    ///
    /// Crate-internal: drivers write registers and tag through
    /// [`DecodeTree::set_registers`], [`DecodeTree::set_tag`] and
    /// [`DecodeTree::tag_mut`], so outgoing slots only change through
    /// attach/release.
    pub(crate) fn node_mut(&mut self, node: NodeRef) -> Result<&mut DecodeTreeNode<R, T, M>> {
        if node.tree != self.tag {
            return Err(TreeError::ForeignNode(node.id));
        }
        self.get_mut(node).ok_or(TreeError::UnknownNode(node.id))
    }

    /// Child of `parent` on branch `index`
    pub fn child(&self, parent: NodeRef, index: usize) -> Result<Option<NodeRef>> {
        self.node(parent)?.child(index)
    }

    /// Parent of `node`, `None` for the root
    pub fn parent(&self, node: NodeRef) -> Result<Option<NodeRef>> {
        Ok(self.node(node)?.incoming())
    }

    /// Whether all `2^k` slots of `node` are occupied
    pub fn is_complete(&self, node: NodeRef) -> Result<bool> {
        Ok(self.node(node)?.is_complete())
    }

    /// Whether slots `0..limit` of `node` are occupied
    pub fn is_complete_up_to(&self, node: NodeRef, limit: usize) -> Result<bool> {
        Ok(self.node(node)?.is_complete_up_to(limit))
    }

    /// Branch indices of `node` that have no child yet
    pub fn open_branches(&self, node: NodeRef) -> Result<Vec<usize>> {
        Ok(self.node(node)?.open_branches().collect())
    }

    /// Replace the payload of `node`
    pub fn set_tag(&mut self, node: NodeRef, tag: T) -> Result<()> {
        self.node_mut(node)?.set_tag(tag);
        Ok(())
    }

    /// Mutable payload of `node`
    pub fn tag_mut(&mut self, node: NodeRef) -> Result<&mut T> {
        Ok(self.node_mut(node)?.tag_mut())
    }

    /// Release every descendant of `node`, depth first, and empty its slots
    ///
    /// Returns the number of nodes removed; `node` itself stays. Calling it
    /// on a node without children is a no-op returning 0.
    pub fn delete_subtree(&mut self, node: NodeRef) -> Result<usize> {
        let mut pending = self.node_mut(node)?.take_outgoing();
        let mut removed = 0;

        while let Some(child) = pending.pop() {
            // a slot reused by another node is not this child's to free
            if !self.contains(child) {
                continue;
            }
            if let Some(mut released) = self.slots[child.slot()].take() {
                pending.extend(released.take_outgoing());
                self.free.push(child.slot);
                removed += 1;
            }
        }
        self.live -= removed;

        if removed > 0 {
            debug!(node = %node.id, removed, live = self.live, "released subtree");
        }
        Ok(removed)
    }

    /// Empty `parent`'s slot `index`, releasing the child and its subtree
    ///
    /// Returns the number of nodes removed, child included (0 if the slot
    /// was already empty).
    pub fn release_child(&mut self, parent: NodeRef, index: usize) -> Result<usize> {
        let Some(child) = self.child(parent, index)? else {
            return Ok(0);
        };

        let removed = self.delete_subtree(child)? + 1;
        self.slots[child.slot()] = None;
        self.free.push(child.slot);
        self.live -= 1;
        if let Some(parent_node) = self.slots[parent.slot()].as_mut() {
            parent_node.set_outgoing(index, None);
        }

        trace!(parent = %parent.id, branch = index, removed, "released child");
        Ok(removed)
    }

    /// Check every structural invariant of the tree
    ///
    /// Root has no parent and depth 0; each child links back to its parent,
    /// carries the symbol of its slot, sits one level deeper and has
    /// `path = parent path + edge` within `tolerance`; ids are unique and
    /// every live node is reachable from the root.
    pub fn verify(&self, tolerance: f64) -> Result<()> {
        let root = self.node(self.root)?;
        if !root.is_root() || root.depth() != 0 {
            return Err(TreeError::InvariantViolation(
                "root must have no parent and depth 0".to_string(),
            ));
        }

        let mut ids = HashSet::with_capacity(self.live);
        let mut reached = 0;

        for (node_ref, node) in self.depth_first(self.root)? {
            reached += 1;
            if !ids.insert(node.id()) {
                return Err(TreeError::InvariantViolation(format!(
                    "duplicate id {}",
                    node.id()
                )));
            }

            for (index, child_ref) in node.children() {
                let child = self.get(child_ref).ok_or_else(|| {
                    TreeError::InvariantViolation(format!(
                        "child {} of {} is not live",
                        child_ref.id,
                        node.id()
                    ))
                })?;

                if child.incoming() != Some(node_ref) {
                    return Err(TreeError::InvariantViolation(format!(
                        "child {} does not point back to {}",
                        child.id(),
                        node.id()
                    )));
                }
                if child.in_symbol() as usize != index {
                    return Err(TreeError::InvariantViolation(format!(
                        "child {} has symbol {} but sits on branch {index}",
                        child.id(),
                        child.in_symbol()
                    )));
                }
                if child.depth() != node.depth() + 1 {
                    return Err(TreeError::InvariantViolation(format!(
                        "child {} at depth {} under parent at depth {}",
                        child.id(),
                        child.depth(),
                        node.depth()
                    )));
                }
                let expected = node.path_metric() + child.incoming_edge_metric();
                if !expected.within(child.path_metric(), tolerance) {
                    return Err(TreeError::InvariantViolation(format!(
                        "child {} path metric {:?} != {:?} + {:?}",
                        child.id(),
                        child.path_metric(),
                        node.path_metric(),
                        child.incoming_edge_metric()
                    )));
                }
            }
        }

        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        if reached != self.live || occupied != self.live {
            return Err(TreeError::InvariantViolation(format!(
                "{} live nodes, {occupied} occupied slots, {reached} reachable from root",
                self.live
            )));
        }
        Ok(())
    }
}

impl<R, T, M> DecodeTree<R, T, M>
where
    R: Clone + Default,
    T: Default,
    M: Metric,
{
    /// Save the encoder register snapshot at `node`
    pub fn set_registers(&mut self, node: NodeRef, registers: &[R]) -> Result<()> {
        self.node_mut(node)?.set_registers(registers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Tree = DecodeTree<u8, u32, f32>;

    fn binary_tree() -> Tree {
        DecodeTree::new(TreeConfig::new(1)).unwrap()
    }

    #[test]
    fn test_root_shape() {
        let tree = binary_tree();
        let root = tree.node(tree.root()).unwrap();
        assert_eq!(root.id(), NodeId(0));
        assert_eq!(root.depth(), 0);
        assert!(root.incoming().is_none());
        assert_eq!(root.path_metric(), 0.0);
        assert_eq!(tree.live_nodes(), 1);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut tree = binary_tree();
        let root = tree.root();
        let a = tree.create_child(root, 0, 1.0).unwrap();
        let b = tree.create_child(root, 1, 1.0).unwrap();
        assert_eq!(a.id(), NodeId(1));
        assert_eq!(b.id(), NodeId(2));
    }

    #[test]
    fn test_attach_rejects_out_of_range_branch() {
        let mut tree = binary_tree();
        let root = tree.root();
        let child = tree.create_child(root, 1, 0.5).unwrap();
        assert_eq!(
            tree.attach_child(root, 2, child),
            Err(TreeError::BranchOutOfRange { index: 2, fan_out: 2 })
        );
        assert_eq!(tree.live_nodes(), 1);
    }

    #[test]
    fn test_create_rejects_bad_symbol_and_depth() {
        let mut tree = binary_tree();
        let root = tree.root();
        assert!(matches!(
            tree.create(root, 2, 0.0, 0.0, 1),
            Err(TreeError::BranchOutOfRange { index: 2, .. })
        ));
        assert!(matches!(
            tree.create(root, 0, 0.0, 0.0, 3),
            Err(TreeError::DepthMismatch { expected: 1, found: 3 })
        ));
    }

    #[test]
    fn test_attach_rejects_symbol_mismatch() {
        let mut tree = binary_tree();
        let root = tree.root();
        let child = tree.create_child(root, 1, 0.5).unwrap();
        assert_eq!(
            tree.attach_child(root, 0, child),
            Err(TreeError::SymbolMismatch { index: 0, symbol: 1 })
        );
    }

    #[test]
    fn test_attach_rejects_wrong_parent() {
        let mut tree = binary_tree();
        let root = tree.root();
        let a = tree.extend(root, 0, 1.0).unwrap();
        let b = tree.extend(root, 1, 1.0).unwrap();
        let under_a = tree.create_child(a, 0, 1.0).unwrap();
        assert!(matches!(
            tree.attach_child(b, 0, under_a),
            Err(TreeError::ParentMismatch { .. })
        ));
    }

    #[test]
    fn test_attach_rejects_foreign_node() {
        let mut tree = binary_tree();
        let mut other = binary_tree();
        let other_root = other.root();
        let foreign = other.create_child(other_root, 0, 1.0).unwrap();
        let root = tree.root();
        assert!(matches!(
            tree.attach_child(root, 0, foreign),
            Err(TreeError::ForeignNode(_))
        ));
        assert!(matches!(
            tree.node(other_root),
            Err(TreeError::ForeignNode(_))
        ));
    }

    #[test]
    fn test_occupied_slot_requires_release() {
        let mut tree = binary_tree();
        let root = tree.root();
        let first = tree.extend(root, 0, 1.0).unwrap();
        tree.extend(first, 1, 1.0).unwrap();

        assert_eq!(
            tree.extend(root, 0, 3.0),
            Err(TreeError::SlotOccupied {
                parent: NodeId(0),
                index: 0
            })
        );
        assert_eq!(tree.live_nodes(), 3);

        assert_eq!(tree.release_child(root, 0).unwrap(), 2);
        assert_eq!(tree.live_nodes(), 1);
        assert!(!tree.contains(first));

        let second = tree.extend(root, 0, 3.0).unwrap();
        assert_eq!(tree.node(second).unwrap().path_metric(), 3.0);
        assert_eq!(tree.release_child(root, 1).unwrap(), 0);
    }

    #[test]
    fn test_stale_handle_never_aliases_reused_slot() {
        let mut tree = binary_tree();
        let root = tree.root();
        let old = tree.extend(root, 0, 1.0).unwrap();
        tree.delete_subtree(root).unwrap();

        let new = tree.extend(root, 0, 2.0).unwrap();
        assert_eq!(new.slot(), old.slot());
        assert_eq!(tree.node(old), Err(TreeError::UnknownNode(old.id())));
        assert_eq!(tree.node(new).unwrap().path_metric(), 2.0);
    }

    #[test]
    fn test_delete_subtree_skips_stale_outgoing_handle() {
        let mut tree = binary_tree();
        let root = tree.root();
        let a = tree.extend(root, 0, 1.0).unwrap();
        let a0 = tree.extend(a, 0, 1.0).unwrap();
        let snapshot = tree.node(a).unwrap().clone();

        assert_eq!(tree.release_child(a, 0).unwrap(), 1);
        let b = tree.extend(root, 1, 2.0).unwrap();
        assert_eq!(b.slot(), a0.slot());

        // a's outgoing slot now names a0, whose arena slot holds b
        *tree.get_mut(a).unwrap() = snapshot;
        assert_eq!(tree.delete_subtree(a).unwrap(), 0);

        assert!(tree.contains(b));
        assert_eq!(tree.child(root, 1).unwrap(), Some(b));
        assert_eq!(tree.live_nodes(), 3);
        assert!(tree.verify(1e-6).is_ok());
    }

    #[test]
    fn test_open_branches_lists_empty_slots() {
        let mut tree: DecodeTree<u8, u32, f32> = DecodeTree::new(TreeConfig::new(2)).unwrap();
        let root = tree.root();
        assert_eq!(tree.open_branches(root).unwrap(), vec![0, 1, 2, 3]);
        tree.extend(root, 1, 0.5).unwrap();
        tree.extend(root, 3, 0.5).unwrap();
        assert_eq!(tree.open_branches(root).unwrap(), vec![0, 2]);

        tree.delete_subtree(root).unwrap();
        assert_eq!(tree.open_branches(root).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_slot_index_checked() {
        assert_eq!(slot_index(0), Ok(0));
        assert_eq!(slot_index(u32::MAX as usize), Ok(u32::MAX));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_slot_index_rejects_arena_past_u32() {
        let len = u32::MAX as usize + 1;
        assert_eq!(slot_index(len), Err(TreeError::CapacityExhausted(len)));
    }

    #[test]
    fn test_delete_subtree_is_idempotent() {
        let mut tree = binary_tree();
        let root = tree.root();
        let a = tree.extend(root, 0, 1.0).unwrap();
        tree.extend(a, 0, 1.0).unwrap();
        tree.extend(a, 1, 2.0).unwrap();

        assert_eq!(tree.delete_subtree(root).unwrap(), 3);
        assert_eq!(tree.delete_subtree(root).unwrap(), 0);
        assert_eq!(tree.live_nodes(), 1);
        assert!(tree.verify(1e-6).is_ok());
    }

    #[test]
    fn test_registers_and_tag() {
        let mut tree = binary_tree();
        let root = tree.root();
        let mut pending = tree.create_child(root, 1, 0.25).unwrap();
        pending.set_registers(&[0b10]).unwrap();
        pending.set_tag(7);
        let child = tree.attach_child(root, 1, pending).unwrap();

        assert_eq!(tree.node(child).unwrap().registers(), &[0b10]);
        assert_eq!(*tree.node(child).unwrap().tag(), 7);

        *tree.tag_mut(child).unwrap() += 1;
        tree.set_registers(child, &[0b01]).unwrap();
        assert_eq!(*tree.node(child).unwrap().tag(), 8);
        assert!(matches!(
            tree.set_registers(child, &[1, 2]),
            Err(TreeError::RegisterWidth { expected: 1, found: 2 })
        ));
    }

    #[test]
    fn test_verify_catches_inconsistent_metric() {
        let mut tree = binary_tree();
        let root = tree.root();
        let bad = tree.create(root, 0, 1.0, 5.0, 1).unwrap();
        tree.attach_child(root, 0, bad).unwrap();
        assert!(matches!(
            tree.verify(1e-6),
            Err(TreeError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            Tree::new(TreeConfig::new(0)),
            Err(TreeError::InvalidConfiguration(_))
        ));
    }
}
