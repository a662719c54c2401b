//! Error types for list storage and traversal.

use crate::node::NodeId;

/// Errors that can occur while reading or relinking arena nodes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// The handle refers to a slot that was freed or never allocated.
    #[error("stale node handle: {0}")]
    StaleNode(NodeId),

    /// A chain ended before reaching the length the caller counted.
    #[error("list ended after node {after} but {expected} more node(s) were expected")]
    UnexpectedEnd {
        /// The last node that was reached.
        after: NodeId,
        /// How many further nodes the caller expected.
        expected: usize,
    },

    /// Traversal came back to a node it had already visited.
    #[error("circular linked list detected at node {node}; aborted after: {partial}")]
    CycleDetected {
        /// The node that was reached a second time.
        node: NodeId,
        /// Output produced before the cycle was found.
        partial: String,
    },
}

/// Convenience alias for list results.
pub type ListResult<T> = Result<T, ListError>;
