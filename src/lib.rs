//! # Decode-tree core for sequential decoding of convolutional codes
//!
//! Stack and Fano decoders explore the code tree one branch at a time,
//! always extending the most promising partial path. This crate provides
//! the tree those decoders grow, prune and backtrack.
//!
//! ## Components
//!
//! 1. **Decode tree** ([`DecodeTree`]): arena of fused node + incoming-edge
//!    entries, `2^k` outgoing slots per node, exclusive parent → child
//!    ownership, depth-first subtree release
//! 2. **Ordering** ([`FrontierKey`]): path metric ascending, id ascending,
//!    a strict total order even for equal metrics
//! 3. **Frontier** ([`Frontier`]): sorted set of open nodes for the driver
//! 4. **Utilities** ([`util`]): factorial, binomial coefficients and parity,
//!    symbol vector printing
//!
//! The search policy, metric formula and encoder model belong to the
//! driver and are not part of this crate.
//!
//! ## Usage Example
//!
//! ```
//! use convtree::{DecodeTree, TreeConfig};
//!
//! let mut tree: DecodeTree = DecodeTree::new(TreeConfig::new(1))?;
//! let root = tree.root();
//! let a = tree.extend(root, 0, 2.0)?;
//! let b = tree.extend(root, 1, 1.0)?;
//!
//! assert!(tree.node(b)? < tree.node(a)?);
//! assert!(tree.is_complete(root)?);
//!
//! tree.mark_final_path(b)?;
//! assert_eq!(tree.decoded_symbols(b)?, vec![1]);
//!
//! assert_eq!(tree.delete_subtree(root)?, 2);
//! assert!(!tree.is_complete(root)?);
//! # Ok::<(), convtree::TreeError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod frontier; // Sorted open-node set
pub mod tree; // Decode tree arena, nodes, ordering
pub mod util; // Numeric and display helpers

// Re-exports for convenience
pub use frontier::Frontier;
pub use tree::{
    DecodeTree, DecodeTreeNode, DetachedNode, FrontierKey, Metric, NodeId, NodeRef, Result,
    Symbol, TreeConfig, TreeError,
};
