//! Arena-backed singly-linked lists.
//!
//! Nodes live in a [`NodeArena`] and link to each other through copyable
//! [`NodeId`] handles instead of owning pointers. A list is nothing more
//! than the `Option<NodeId>` of its head, so algorithms can relink nodes
//! freely without ever holding two owners of the same node.
//!
//! # Key Types
//!
//! - [`NodeArena`] -- owns every node; allocation, linking, destruction
//! - [`NodeId`] / [`ListNode`] -- generational handle and the stored node
//! - [`ListGuard`] -- frees a set of lists when it goes out of scope
//!
//! # Design Rules
//!
//! 1. Freed handles go stale (generation mismatch) and are rejected, never
//!    silently aliased to a reused slot.
//! 2. Traversal assumes acyclic lists, except for [`NodeArena::render`] and
//!    [`NodeArena::to_vec`], which report cycles as errors.

pub mod arena;
pub mod error;
pub mod guard;
pub mod node;
pub mod render;

pub use arena::{ListIter, NodeArena};
pub use error::{ListError, ListResult};
pub use guard::ListGuard;
pub use node::{ListNode, NodeId};
pub use render::RenderStyle;
