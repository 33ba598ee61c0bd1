//! Total order over decode-tree nodes
//!
//! Sequential decoders keep open nodes in a priority structure. The key is
//! the path metric; ids break ties so equal metrics still give a strict,
//! reproducible order.

use std::cmp::Ordering;

use super::metric::Metric;
use super::node::NodeId;

/// Ordering key of a node: `(path_metric, id)`, both ascending
///
/// Two keys compare equal only when metric and id are both equal, which for
/// nodes of one tree means the same node.
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey<M> {
    /// Path metric at the node
    pub path_metric: M,
    /// Node id (tie-break)
    pub id: NodeId,
}

impl<M: Metric> FrontierKey<M> {
    /// Build a key
    pub fn new(path_metric: M, id: NodeId) -> Self {
        Self { path_metric, id }
    }
}

impl<M: Metric> Ord for FrontierKey<M> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path_metric
            .order(&other.path_metric)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl<M: Metric> PartialOrd for FrontierKey<M> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<M: Metric> PartialEq for FrontierKey<M> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<M: Metric> Eq for FrontierKey<M> {}
