//! Structural errors reported by tree mutation and query operations.
//!
//! Every variant indicates a caller bug (a stale handle, a wrong parent, an out of
//! range index); none of them is fixed by retrying.

use thiserror::Error;

use crate::node::NodeId;

/// Failure of a tree operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The handle does not refer to a live node.
    #[error("node {0:?} does not exist in the tree")]
    InvalidNode(NodeId),

    /// The parent handle of a parent/child operation does not refer to a live node.
    #[error("parent node {0:?} does not exist in the tree")]
    InvalidParent(NodeId),

    /// A child index past the end of the parent's child list.
    #[error("index {child_index} is out of bounds for parent {parent:?} with {child_count} children")]
    ChildIndexOutOfBounds {
        /// Parent whose children were indexed.
        parent: NodeId,
        /// Requested index.
        child_index: usize,
        /// Actual number of children.
        child_count: usize,
    },

    /// The node is not a child of the given parent.
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Supposed parent.
        parent: NodeId,
        /// Supposed child.
        child: NodeId,
    },

    /// Attaching the child would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CycleDetected {
        /// Node that would receive the child.
        parent: NodeId,
        /// Node that is already an ancestor of (or equal to) the parent.
        child: NodeId,
    },
}

/// Result alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
