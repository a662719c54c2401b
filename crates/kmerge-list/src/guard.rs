//! Scope-bound cleanup of lists.

use std::ops::{Deref, DerefMut};

use crate::arena::NodeArena;
use crate::node::NodeId;

/// Frees every tracked list when dropped, whatever the exit path.
///
/// The guard borrows the arena mutably and derefs to it, so lists can be
/// built and merged through the guard while it is alive. Heads that alias
/// into a chain already freed through another head free nothing, so after a
/// merge each node is still released exactly once.
pub struct ListGuard<'a, T> {
    arena: &'a mut NodeArena<T>,
    heads: Vec<Option<NodeId>>,
}

impl<'a, T> ListGuard<'a, T> {
    /// Guard `arena` with no lists tracked yet.
    pub fn new(arena: &'a mut NodeArena<T>) -> Self {
        Self {
            arena,
            heads: Vec::new(),
        }
    }

    /// Register a list to be freed on drop and hand the head back.
    pub fn track(&mut self, head: Option<NodeId>) -> Option<NodeId> {
        if head.is_some() {
            self.heads.push(head);
        }
        head
    }

    /// Number of heads registered so far.
    pub fn tracked(&self) -> usize {
        self.heads.len()
    }
}

impl<T> Deref for ListGuard<'_, T> {
    type Target = NodeArena<T>;

    fn deref(&self) -> &Self::Target {
        &*self.arena
    }
}

impl<T> DerefMut for ListGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.arena
    }
}

impl<T> Drop for ListGuard<'_, T> {
    fn drop(&mut self) {
        // Last registered first.
        while let Some(mut head) = self.heads.pop() {
            self.arena.free_list(&mut head);
        }
    }
}
