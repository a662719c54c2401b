//! The node arena: storage, linking, construction and destruction.
//!
//! [`NodeArena`] stores nodes in a `Vec` of generational slots. Freed slots
//! go on a free list and are reused by later allocations; every reuse bumps
//! the slot generation so handles to the old node stop resolving.
//!
//! # Invariants
//!
//! - `live` equals the number of occupied slots.
//! - A slot on the free list is vacant.
//! - Methods that walk a list assume it is acyclic unless documented as
//!   cycle-guarded.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ListError, ListResult};
use crate::node::{ListNode, NodeId};

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    node: Option<ListNode<T>>,
}

/// Owner of every node in a family of singly-linked lists.
#[derive(Clone, Debug)]
pub struct NodeArena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
}

impl<T> NodeArena<T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Create an empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if no node is live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots ever allocated, live or vacant.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if `id` names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    // ---------------------------------------------------------------
    // Allocation
    // ---------------------------------------------------------------

    /// Allocate a detached node holding `value`.
    pub fn alloc(&mut self, value: T) -> NodeId {
        self.insert(ListNode::new(value))
    }

    fn insert(&mut self, node: ListNode<T>) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId::new(index, slot.generation);
        }
        let index = u32::try_from(self.slots.len()).expect("arena slot index overflowed u32");
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId::new(index, 0)
    }

    /// Build a list holding `values` in iteration order and return its head.
    ///
    /// An empty iterator yields an empty list (`None`).
    pub fn make_list<I>(&mut self, values: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = T>,
    {
        let mut head = None;
        let mut tail: Option<NodeId> = None;
        for value in values {
            let id = self.alloc(value);
            match tail.and_then(|prev| self.node_mut(prev)) {
                Some(prev) => prev.next = Some(id),
                None => head = Some(id),
            }
            tail = Some(id);
        }
        head
    }

    /// Allocate a node in front of `*head` and make it the new head.
    pub fn push_front(&mut self, head: &mut Option<NodeId>, value: T) -> NodeId {
        let id = self.insert(ListNode { value, next: *head });
        *head = Some(id);
        id
    }

    // ---------------------------------------------------------------
    // Access
    // ---------------------------------------------------------------

    fn node(&self, id: NodeId) -> Option<&ListNode<T>> {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut ListNode<T>> {
        self.slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    /// Borrow the node named by `id`.
    pub fn get(&self, id: NodeId) -> ListResult<&ListNode<T>> {
        self.node(id).ok_or(ListError::StaleNode(id))
    }

    /// Mutably borrow the node named by `id`.
    pub fn get_mut(&mut self, id: NodeId) -> ListResult<&mut ListNode<T>> {
        self.node_mut(id).ok_or(ListError::StaleNode(id))
    }

    /// Borrow the value stored at `id`.
    pub fn value(&self, id: NodeId) -> ListResult<&T> {
        self.get(id).map(|node| &node.value)
    }

    /// Successor of `id`.
    pub fn next(&self, id: NodeId) -> ListResult<Option<NodeId>> {
        self.get(id).map(|node| node.next)
    }

    /// Point `id` at `next`, returning the previous successor.
    pub fn set_next(&mut self, id: NodeId, next: Option<NodeId>) -> ListResult<Option<NodeId>> {
        let node = self.get_mut(id)?;
        Ok(std::mem::replace(&mut node.next, next))
    }

    /// Cut the link after `id`, returning the detached remainder.
    pub fn take_next(&mut self, id: NodeId) -> ListResult<Option<NodeId>> {
        self.get_mut(id).map(|node| node.next.take())
    }

    // ---------------------------------------------------------------
    // Destruction
    // ---------------------------------------------------------------

    /// Free a single node and return its value. Its successor is not touched.
    pub fn free(&mut self, id: NodeId) -> ListResult<ListNode<T>> {
        let slot = self
            .slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .ok_or(ListError::StaleNode(id))?;
        let node = slot.node.take().ok_or(ListError::StaleNode(id))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        self.live -= 1;
        Ok(node)
    }

    /// Free every node of the list at `*head` and clear the head.
    ///
    /// Returns the number of nodes freed. Calling this on an empty head is a
    /// no-op. Freeing stops at the first handle that no longer resolves, so
    /// a list whose tail was already freed through an alias, or a cyclic
    /// chain, is released exactly once.
    pub fn free_list(&mut self, head: &mut Option<NodeId>) -> usize {
        let mut cursor = head.take();
        let mut freed = 0;
        while let Some(id) = cursor {
            match self.free(id) {
                Ok(node) => {
                    cursor = node.next;
                    freed += 1;
                }
                Err(_) => break,
            }
        }
        if freed > 0 {
            debug!(freed, live = self.live, "freed list");
        }
        freed
    }

    /// Drop every node. Slots are kept and their generations advanced, so
    /// handles taken before the call stay stale after later allocations.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index as u32);
        }
        self.live = 0;
    }

    // ---------------------------------------------------------------
    // Traversal
    // ---------------------------------------------------------------

    /// Iterate over `(id, value)` pairs starting at `head`.
    ///
    /// The iterator ends at the tail or at the first stale handle. It does not
    /// detect cycles.
    pub fn iter(&self, head: Option<NodeId>) -> ListIter<'_, T> {
        ListIter {
            arena: self,
            cursor: head,
        }
    }

    /// Node handles of the list at `head`, in order. Cycle-guarded.
    pub fn ids(&self, head: Option<NodeId>) -> ListResult<Vec<NodeId>> {
        let mut ids = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = head;
        while let Some(id) = cursor {
            if !seen.insert(id) {
                let partial = ids
                    .iter()
                    .map(NodeId::to_string)
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(ListError::CycleDetected { node: id, partial });
            }
            cursor = self.next(id)?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Number of nodes in the list at `head`. Cycle-guarded.
    pub fn list_len(&self, head: Option<NodeId>) -> ListResult<usize> {
        self.ids(head).map(|ids| ids.len())
    }
}

impl<T: Clone> NodeArena<T> {
    /// Clone the values of the list at `head` into a `Vec`. Cycle-guarded.
    pub fn to_vec(&self, head: Option<NodeId>) -> ListResult<Vec<T>> {
        self.ids(head)?
            .into_iter()
            .map(|id| self.value(id).cloned())
            .collect()
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the nodes of one list, created by [`NodeArena::iter`].
#[derive(Debug)]
pub struct ListIter<'a, T> {
    arena: &'a NodeArena<T>,
    cursor: Option<NodeId>,
}

impl<'a, T> Iterator for ListIter<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.arena.node(id);
        self.cursor = node.and_then(|n| n.next);
        node.map(|n| (id, &n.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_list_preserves_order() {
        let mut arena = NodeArena::new();
        let head = arena.make_list([1, 4, 5]);
        assert_eq!(arena.to_vec(head).unwrap(), vec![1, 4, 5]);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn make_list_empty_is_none() {
        let mut arena: NodeArena<i64> = NodeArena::new();
        assert!(arena.make_list(Vec::new()).is_none());
        assert!(arena.is_empty());
    }

    #[test]
    fn push_front_becomes_head() {
        let mut arena = NodeArena::new();
        let mut head = arena.make_list([2, 3]);
        let id = arena.push_front(&mut head, 1);
        assert_eq!(head, Some(id));
        assert_eq!(arena.to_vec(head).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn push_front_on_empty_list() {
        let mut arena = NodeArena::new();
        let mut head = None;
        arena.push_front(&mut head, 9);
        assert_eq!(arena.to_vec(head).unwrap(), vec![9]);
    }

    #[test]
    fn free_list_clears_head_and_counts() {
        let mut arena = NodeArena::new();
        let mut head = arena.make_list([1, 2, 3]);
        assert_eq!(arena.free_list(&mut head), 3);
        assert!(head.is_none());
        assert!(arena.is_empty());
    }

    #[test]
    fn free_list_twice_is_noop() {
        let mut arena = NodeArena::new();
        let mut head = arena.make_list([1, 2]);
        arena.free_list(&mut head);
        assert_eq!(arena.free_list(&mut head), 0);
        assert!(arena.is_empty());
    }

    #[test]
    fn free_list_on_alias_of_freed_chain() {
        let mut arena = NodeArena::new();
        let mut head = arena.make_list([1, 2, 3]);
        let mut alias = head;
        assert_eq!(arena.free_list(&mut head), 3);
        assert_eq!(arena.free_list(&mut alias), 0);
        assert!(alias.is_none());
    }

    #[test]
    fn free_list_terminates_on_cycle() {
        let mut arena = NodeArena::new();
        let mut head = arena.make_list([1, 2, 3]);
        let ids = arena.ids(head).unwrap();
        arena.set_next(ids[2], Some(ids[0])).unwrap();
        assert_eq!(arena.free_list(&mut head), 3);
        assert!(arena.is_empty());
    }

    #[test]
    fn stale_handle_is_rejected() {
        let mut arena = NodeArena::new();
        let id = arena.alloc(5);
        arena.free(id).unwrap();
        assert_eq!(arena.get(id).unwrap_err(), ListError::StaleNode(id));
        assert!(!arena.contains(id));
    }

    #[test]
    fn reused_slot_bumps_generation() {
        let mut arena = NodeArena::new();
        let old = arena.alloc(1);
        arena.free(old).unwrap();
        let new = arena.alloc(2);
        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());
        assert_eq!(*arena.value(new).unwrap(), 2);
        assert!(arena.value(old).is_err());
        assert_eq!(arena.capacity(), 1);
    }

    #[test]
    fn set_and_take_next() {
        let mut arena = NodeArena::new();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        assert_eq!(arena.set_next(a, Some(b)).unwrap(), None);
        assert_eq!(arena.next(a).unwrap(), Some(b));
        assert_eq!(arena.take_next(a).unwrap(), Some(b));
        assert_eq!(arena.next(a).unwrap(), None);
    }

    #[test]
    fn ids_detects_cycle() {
        let mut arena = NodeArena::new();
        let head = arena.make_list([1, 2]);
        let ids = arena.ids(head).unwrap();
        arena.set_next(ids[1], Some(ids[0])).unwrap();
        match arena.ids(head) {
            Err(ListError::CycleDetected { node, .. }) => assert_eq!(node, ids[0]),
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn iter_yields_ids_and_values() {
        let mut arena = NodeArena::new();
        let head = arena.make_list(["x", "y"]);
        let pairs: Vec<_> = arena.iter(head).map(|(_, v)| *v).collect();
        assert_eq!(pairs, vec!["x", "y"]);
        assert_eq!(arena.list_len(head).unwrap(), 2);
    }

    #[test]
    fn clear_drops_nodes_and_keeps_slots() {
        let mut arena = NodeArena::new();
        arena.make_list([1, 2, 3]);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.capacity(), 3);
        arena.make_list([4, 5, 6]);
        assert_eq!(arena.capacity(), 3);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn handle_from_before_clear_stays_stale() {
        let mut arena = NodeArena::new();
        let old = arena.alloc(1);
        arena.clear();
        let new = arena.alloc(99);
        assert_eq!(new.index(), old.index());
        assert_eq!(arena.value(old).unwrap_err(), ListError::StaleNode(old));
        assert_eq!(*arena.value(new).unwrap(), 99);
    }
}
