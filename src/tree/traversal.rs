//! Tree walks and backtracking
//!
//! Ancestor walk: node → parent → … → root, following `incoming`
//! Depth-first walk: pre-order, lower branch index first
//!
//! Backtracking marks the decoded path once the driver has picked a
//! terminal node. Marks are one-shot and never cleared.

use tracing::debug;

use super::metric::Metric;
use super::node::{DecodeTreeNode, NodeRef, Symbol};
use super::{DecodeTree, Result};

/// Iterator from a node up to the root, both included
#[derive(Debug)]
pub struct Ancestors<'a, R, T, M> {
    tree: &'a DecodeTree<R, T, M>,
    next: Option<NodeRef>,
}

impl<'a, R, T, M: Metric> Iterator for Ancestors<'a, R, T, M> {
    type Item = (NodeRef, &'a DecodeTreeNode<R, T, M>);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let node = self.tree.get(current)?;
        self.next = node.incoming();
        Some((current, node))
    }
}

/// Pre-order iterator over a subtree
#[derive(Debug)]
pub struct DepthFirst<'a, R, T, M> {
    tree: &'a DecodeTree<R, T, M>,
    stack: Vec<NodeRef>,
}

impl<'a, R, T, M: Metric> Iterator for DepthFirst<'a, R, T, M> {
    type Item = (NodeRef, &'a DecodeTreeNode<R, T, M>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.stack.pop()?;
            if let Some(node) = self.tree.get(current) {
                // reversed so branch 0 is visited first
                self.stack
                    .extend(node.outgoing().iter().rev().flatten().copied());
                return Some((current, node));
            }
        }
    }
}

impl<R, T, M: Metric> DecodeTree<R, T, M> {
    /// Walk from `from` up to the root
    pub fn ancestors(&self, from: NodeRef) -> Result<Ancestors<'_, R, T, M>> {
        self.node(from)?;
        Ok(Ancestors {
            tree: self,
            next: Some(from),
        })
    }

    /// Walk the subtree rooted at `from` in pre-order
    pub fn depth_first(&self, from: NodeRef) -> Result<DepthFirst<'_, R, T, M>> {
        self.node(from)?;
        Ok(DepthFirst {
            tree: self,
            stack: vec![from],
        })
    }

    /// Number of live nodes in the subtree rooted at `from`, itself included
    pub fn subtree_size(&self, from: NodeRef) -> Result<usize> {
        Ok(self.depth_first(from)?.count())
    }

    /// Mark every node from `leaf` up to the root as on the final path
    ///
    /// Returns the number of nodes on the path (depth + 1).
    pub fn mark_final_path(&mut self, leaf: NodeRef) -> Result<usize> {
        let path: Vec<NodeRef> = self.ancestors(leaf)?.map(|(node, _)| node).collect();
        for node in &path {
            if let Some(node) = self.get_mut(*node) {
                node.mark_on_final_path();
            }
        }

        debug!(leaf = %leaf.id(), length = path.len(), "marked final path");
        Ok(path.len())
    }

    /// Marked path read forward, root first
    ///
    /// At each node the lowest marked branch is followed. Empty if the root
    /// has not been marked yet.
    pub fn final_path(&self) -> Vec<NodeRef> {
        let mut path = Vec::new();
        let mut current = Some(self.root);

        while let Some(node_ref) = current {
            let Some(node) = self.get(node_ref) else {
                break;
            };
            if !node.is_on_final_path() {
                break;
            }
            path.push(node_ref);
            current = node
                .children()
                .map(|(_, child)| child)
                .find(|child| self.get(*child).is_some_and(|c| c.is_on_final_path()));
        }

        path
    }

    /// Input symbols along the path root → `leaf`, root excluded
    pub fn decoded_symbols(&self, leaf: NodeRef) -> Result<Vec<Symbol>> {
        let mut symbols: Vec<Symbol> = self
            .ancestors(leaf)?
            .filter(|(_, node)| !node.is_root())
            .map(|(_, node)| node.in_symbol())
            .collect();
        symbols.reverse();
        Ok(symbols)
    }
}
