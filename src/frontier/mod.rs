//! Ordered frontier of open nodes
//!
//! Stack-style sequential decoders keep every open node sorted by path
//! metric, extend the best one and drop the worst when the stack is full.
//! [`Frontier`] is that sorted set, keyed by [`FrontierKey`] so equal
//! metrics still order deterministically by id.
//!
//! Which end counts as "best" is the driver's call: keys ascend, so
//! [`Frontier::pop_first`] yields the lowest metric and
//! [`Frontier::pop_last`] the highest.

use std::collections::BTreeMap;

use tracing::debug;

use crate::tree::{DecodeTree, FrontierKey, Metric, NodeRef, Result};

/// Sorted set of open-node handles
#[derive(Debug, Clone)]
pub struct Frontier<M> {
    entries: BTreeMap<FrontierKey<M>, NodeRef>,
}

impl<M: Metric> Default for Frontier<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Metric> Frontier<M> {
    /// Empty frontier
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add `node` under its current key; returns false if already present
    pub fn insert<R, T>(&mut self, tree: &DecodeTree<R, T, M>, node: NodeRef) -> Result<bool> {
        let key = tree.node(node)?.frontier_key();
        Ok(self.entries.insert(key, node).is_none())
    }

    /// Remove the entry for `key`
    pub fn remove(&mut self, key: &FrontierKey<M>) -> Option<NodeRef> {
        self.entries.remove(key)
    }

    /// Lowest entry
    pub fn first(&self) -> Option<(FrontierKey<M>, NodeRef)> {
        self.entries.first_key_value().map(|(k, v)| (*k, *v))
    }

    /// Highest entry
    pub fn last(&self) -> Option<(FrontierKey<M>, NodeRef)> {
        self.entries.last_key_value().map(|(k, v)| (*k, *v))
    }

    /// Remove and return the lowest entry
    pub fn pop_first(&mut self) -> Option<(FrontierKey<M>, NodeRef)> {
        self.entries.pop_first()
    }

    /// Remove and return the highest entry
    pub fn pop_last(&mut self) -> Option<(FrontierKey<M>, NodeRef)> {
        self.entries.pop_last()
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&FrontierKey<M>, &NodeRef)> + '_ {
        self.entries.iter()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop entries whose node was deleted or is no longer open
    ///
    /// Returns the number of entries removed.
    pub fn prune_stale<R, T>(&mut self, tree: &DecodeTree<R, T, M>) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, node| tree.get(*node).is_some_and(|n| !n.is_complete()));
        let removed = before - self.entries.len();

        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "pruned stale frontier entries");
        }
        removed
    }
}
