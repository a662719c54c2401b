//! Phase two: merge sort over links.
//!
//! [`merge_sort`] is told the chain length up front, so it splits by walking
//! exactly `len / 2` nodes instead of searching for the midpoint. Recursion
//! depth is `O(log n)`; no node storage beyond the arena is used.

use kmerge_list::{ListError, NodeArena, NodeId};
use tracing::trace;

use crate::error::MergeResult;

/// Sort the chain of `len` nodes starting at `head` and return the new head.
///
/// Chains of length 0 or 1 are returned as-is.
pub fn merge_sort<T: Ord>(
    arena: &mut NodeArena<T>,
    head: Option<NodeId>,
    len: usize,
) -> MergeResult<Option<NodeId>> {
    if len <= 1 {
        return Ok(head);
    }
    let Some(first) = head else {
        return Ok(None);
    };

    let mid = len / 2;
    let right = split(arena, first, mid, len)?;
    trace!(left = mid, right = len - mid, "split chain");

    let left = merge_sort(arena, Some(first), mid)?;
    let right = merge_sort(arena, right, len - mid)?;
    merge(arena, left, right)
}

/// Cut the chain after its first `mid` nodes and return the second half.
fn split<T>(
    arena: &mut NodeArena<T>,
    head: NodeId,
    mid: usize,
    len: usize,
) -> MergeResult<Option<NodeId>> {
    let mut last = head;
    for step in 1..mid {
        last = arena.next(last)?.ok_or(ListError::UnexpectedEnd {
            after: last,
            expected: len - step,
        })?;
    }
    let right = arena.take_next(last)?;
    if right.is_none() {
        return Err(ListError::UnexpectedEnd {
            after: last,
            expected: len - mid,
        }
        .into());
    }
    Ok(right)
}

/// Merge two sorted chains into one and return its head.
///
/// On equal values the node from `left` is taken first. Once either side
/// runs out, the rest of the other side is linked on in one step.
pub fn merge<T: Ord>(
    arena: &mut NodeArena<T>,
    mut left: Option<NodeId>,
    mut right: Option<NodeId>,
) -> MergeResult<Option<NodeId>> {
    let mut head = None;
    let mut tail: Option<NodeId> = None;

    while let (Some(l), Some(r)) = (left, right) {
        let take = if arena.value(l)? <= arena.value(r)? {
            left = arena.next(l)?;
            l
        } else {
            right = arena.next(r)?;
            r
        };
        append(arena, &mut head, &mut tail, Some(take))?;
    }

    append(arena, &mut head, &mut tail, left.or(right))?;
    Ok(head)
}

fn append<T>(
    arena: &mut NodeArena<T>,
    head: &mut Option<NodeId>,
    tail: &mut Option<NodeId>,
    node: Option<NodeId>,
) -> MergeResult<()> {
    match *tail {
        Some(prev) => {
            arena.set_next(prev, node)?;
        }
        None => *head = node,
    }
    if node.is_some() {
        *tail = node;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(arena: &mut NodeArena<i64>, values: &[i64]) -> Option<NodeId> {
        arena.make_list(values.iter().copied())
    }

    #[test]
    fn merge_interleaves_two_sorted_chains() {
        let mut arena = NodeArena::new();
        let a = chain(&mut arena, &[1, 3, 5]);
        let b = chain(&mut arena, &[2, 4, 6, 8]);
        let head = merge(&mut arena, a, b).unwrap();
        assert_eq!(arena.to_vec(head).unwrap(), vec![1, 2, 3, 4, 5, 6, 8]);
    }

    #[test]
    fn merge_with_empty_side_returns_other() {
        let mut arena = NodeArena::new();
        let a = chain(&mut arena, &[1, 2]);
        assert_eq!(merge(&mut arena, a, None).unwrap(), a);
        assert_eq!(merge(&mut arena, None, a).unwrap(), a);
        assert_eq!(merge::<i64>(&mut arena, None, None).unwrap(), None);
    }

    #[test]
    fn merge_prefers_left_on_ties() {
        let mut arena = NodeArena::new();
        let a = chain(&mut arena, &[1, 2]);
        let b = chain(&mut arena, &[1, 2]);
        let left_ids = arena.ids(a).unwrap();
        let right_ids = arena.ids(b).unwrap();

        let head = merge(&mut arena, a, b).unwrap();
        assert_eq!(
            arena.ids(head).unwrap(),
            vec![left_ids[0], right_ids[0], left_ids[1], right_ids[1]]
        );
    }

    #[test]
    fn merge_sort_sorts_unsorted_chain() {
        let mut arena = NodeArena::new();
        let head = chain(&mut arena, &[5, 1, 4, 2, 3, 0, 9]);
        let sorted = merge_sort(&mut arena, head, 7).unwrap();
        assert_eq!(arena.to_vec(sorted).unwrap(), vec![0, 1, 2, 3, 4, 5, 9]);
    }

    #[test]
    fn merge_sort_short_chains_untouched() {
        let mut arena = NodeArena::new();
        let one = chain(&mut arena, &[42]);
        assert_eq!(merge_sort(&mut arena, one, 1).unwrap(), one);
        assert_eq!(merge_sort::<i64>(&mut arena, None, 0).unwrap(), None);
    }

    #[test]
    fn merge_sort_keeps_sorted_chain_order() {
        let mut arena = NodeArena::new();
        let head = chain(&mut arena, &[1, 2, 2, 3, 7]);
        let before = arena.ids(head).unwrap();
        let sorted = merge_sort(&mut arena, head, 5).unwrap();
        assert_eq!(arena.ids(sorted).unwrap(), before);
    }

    #[test]
    fn merge_sort_rejects_overstated_length() {
        let mut arena = NodeArena::new();
        let head = chain(&mut arena, &[3, 1]);
        let err = merge_sort(&mut arena, head, 5).unwrap_err();
        assert!(matches!(
            err,
            crate::MergeError::List(ListError::UnexpectedEnd { .. })
        ));
    }
}
