//! Node handles and stored nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A generational handle to a node inside a [`NodeArena`](crate::NodeArena).
///
/// The handle is `Copy` and carries no ownership. Once the node it names is
/// freed, the slot's generation moves on and the handle no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the arena.
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Slot generation at the time the node was allocated.
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == 0 {
            write!(f, "#{}", self.index)
        } else {
            write!(f, "#{}v{}", self.index, self.generation)
        }
    }
}

/// A singly-linked node: a value and the handle of its successor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNode<T> {
    pub value: T,
    pub next: Option<NodeId>,
}

impl<T> ListNode<T> {
    /// A detached node with no successor.
    pub fn new(value: T) -> Self {
        Self { value, next: None }
    }

    /// Returns `true` if this node ends its list.
    pub fn is_tail(&self) -> bool {
        self.next.is_none()
    }
}
