//! Fused node + incoming edge
//!
//! In a tree every node has exactly one incoming edge, so the edge data
//! (input symbol, branch metric) lives in the node it leads to.
//!
//! Ownership flows parent → child only: `outgoing` holds the children,
//! `incoming` is a plain handle back to the parent.

use std::cmp::Ordering;
use std::fmt;

use super::metric::Metric;
use super::order::FrontierKey;
use super::{Result, TreeError};

/// Input symbol labelling a branch (k bits, `0..fan_out`)
pub type Symbol = u32;

/// Unique, monotonically increasing node identifier
///
/// Issued by the owning [`DecodeTree`](super::DecodeTree); never reused
/// within a tree, so it doubles as a deterministic tie-break.
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to a live node in a specific tree
///
/// A handle is valid while its arena slot still holds the node with the
/// same id. After the node is deleted every lookup through the handle fails
/// with [`TreeError::UnknownNode`]; it can never alias a newer node.
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub(crate) tree: u64,
    pub(crate) slot: u32,
    pub(crate) id: NodeId,
}

impl NodeRef {
    /// Id of the referenced node
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub(crate) fn slot(&self) -> usize {
        self.slot as usize
    }
}

/// A node of the decode tree together with its incoming edge
///
/// `R` is the encoder register type, `T` the per-tree tag payload and `M`
/// the metric type.
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct DecodeTreeNode<R, T, M> {
    id: NodeId,
    incoming: Option<NodeRef>,
    outgoing: Box<[Option<NodeRef>]>,
    in_symbol: Symbol,
    incoming_edge_metric: M,
    path_metric: M,
    depth: usize,
    registers: Box<[R]>,
    on_final_path: bool,
    tag: T,
}

impl<R, T, M> DecodeTreeNode<R, T, M>
where
    R: Clone + Default,
    T: Default,
    M: Metric,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: NodeId,
        incoming: Option<NodeRef>,
        in_symbol: Symbol,
        incoming_edge_metric: M,
        path_metric: M,
        depth: usize,
        fan_out: usize,
        register_count: usize,
    ) -> Self {
        Self {
            id,
            incoming,
            outgoing: vec![None; fan_out].into_boxed_slice(),
            in_symbol,
            incoming_edge_metric,
            path_metric,
            depth,
            registers: vec![R::default(); register_count].into_boxed_slice(),
            on_final_path: false,
            tag: T::default(),
        }
    }

    /// Save the encoder register snapshot at this node
    ///
    /// The snapshot must hold exactly `k` registers.
    pub fn set_registers(&mut self, registers: &[R]) -> Result<()> {
        if registers.len() != self.registers.len() {
            return Err(TreeError::RegisterWidth {
                expected: self.registers.len(),
                found: registers.len(),
            });
        }
        self.registers.clone_from_slice(registers);
        Ok(())
    }
}

impl<R, T, M: Metric> DecodeTreeNode<R, T, M> {
    /// Node id
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Parent handle, `None` for the root
    #[inline]
    pub fn incoming(&self) -> Option<NodeRef> {
        self.incoming
    }

    /// Whether this is the root node
    #[inline]
    pub fn is_root(&self) -> bool {
        self.incoming.is_none()
    }

    /// Outgoing slots, indexed by input symbol
    #[inline]
    pub fn outgoing(&self) -> &[Option<NodeRef>] {
        &self.outgoing
    }

    /// Number of outgoing slots (`2^k`)
    #[inline]
    pub fn fan_out(&self) -> usize {
        self.outgoing.len()
    }

    /// Child on branch `index`
    pub fn child(&self, index: usize) -> Result<Option<NodeRef>> {
        self.outgoing
            .get(index)
            .copied()
            .ok_or(TreeError::BranchOutOfRange {
                index,
                fan_out: self.outgoing.len(),
            })
    }

    /// Input symbol of the incoming edge (meaningless for the root)
    #[inline]
    pub fn in_symbol(&self) -> Symbol {
        self.in_symbol
    }

    /// Metric of the incoming edge
    #[inline]
    pub fn incoming_edge_metric(&self) -> M {
        self.incoming_edge_metric
    }

    /// Cumulative metric from the root
    #[inline]
    pub fn path_metric(&self) -> M {
        self.path_metric
    }

    /// Distance from the root (root = 0)
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Encoder register snapshot
    #[inline]
    pub fn registers(&self) -> &[R] {
        &self.registers
    }

    /// Driver payload
    #[inline]
    pub fn tag(&self) -> &T {
        &self.tag
    }

    /// Mutable driver payload
    #[inline]
    pub fn tag_mut(&mut self) -> &mut T {
        &mut self.tag
    }

    /// Replace the driver payload
    pub fn set_tag(&mut self, tag: T) {
        self.tag = tag;
    }

    /// Whether backtracking marked this node as part of the decoded path
    #[inline]
    pub fn is_on_final_path(&self) -> bool {
        self.on_final_path
    }

    /// Whether every outgoing slot is occupied
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.is_complete_up_to(self.outgoing.len())
    }

    /// Whether every slot in `0..limit` is occupied
    ///
    /// Stops at the first empty slot. A `limit` above the fan-out is
    /// clamped to it.
    pub fn is_complete_up_to(&self, limit: usize) -> bool {
        let limit = limit.min(self.outgoing.len());
        self.outgoing[..limit].iter().all(Option::is_some)
    }

    /// Branch indices that have no child yet
    pub fn open_branches(&self) -> impl Iterator<Item = usize> + '_ {
        self.outgoing
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(index, _)| index)
    }

    /// Occupied outgoing slots with their branch index
    pub fn children(&self) -> impl Iterator<Item = (usize, NodeRef)> + '_ {
        self.outgoing
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|child| (index, child)))
    }

    /// Ordering key: path metric, then id
    #[inline]
    pub fn frontier_key(&self) -> FrontierKey<M> {
        FrontierKey::new(self.path_metric, self.id)
    }

    pub(crate) fn set_outgoing(&mut self, index: usize, child: Option<NodeRef>) {
        self.outgoing[index] = child;
    }

    pub(crate) fn take_outgoing(&mut self) -> Vec<NodeRef> {
        self.outgoing.iter_mut().filter_map(Option::take).collect()
    }

    pub(crate) fn mark_on_final_path(&mut self) {
        self.on_final_path = true;
    }
}

/// Nodes order by ascending path metric, ties broken by ascending id.
///
/// This is the only comparison defined on nodes; wrap in
/// [`std::cmp::Reverse`] for the descending order.
impl<R, T, M: Metric> Ord for DecodeTreeNode<R, T, M> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.frontier_key().cmp(&other.frontier_key())
    }
}

impl<R, T, M: Metric> PartialOrd for DecodeTreeNode<R, T, M> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R, T, M: Metric> PartialEq for DecodeTreeNode<R, T, M> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<R, T, M: Metric> Eq for DecodeTreeNode<R, T, M> {}

/// A node created for a tree but not yet attached to it
///
/// Held by the driver while the channel/encoder model fills in registers
/// and tag. Dropping it discards the node.
#[derive(Debug)]
pub struct DetachedNode<R, T, M> {
    pub(crate) tree: u64,
    pub(crate) node: DecodeTreeNode<R, T, M>,
}

impl<R, T, M> DetachedNode<R, T, M>
where
    R: Clone + Default,
    T: Default,
    M: Metric,
{
    /// Id reserved for this node
    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    /// Read access to the pending node
    pub fn node(&self) -> &DecodeTreeNode<R, T, M> {
        &self.node
    }

    /// Save the encoder register snapshot
    pub fn set_registers(&mut self, registers: &[R]) -> Result<()> {
        self.node.set_registers(registers)
    }

    /// Replace the driver payload
    pub fn set_tag(&mut self, tag: T) {
        self.node.set_tag(tag);
    }

    /// Mutable driver payload
    pub fn tag_mut(&mut self) -> &mut T {
        self.node.tag_mut()
    }
}
