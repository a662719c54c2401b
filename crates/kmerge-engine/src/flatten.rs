//! Phase one: splice k lists into a single chain.

use kmerge_list::{NodeArena, NodeId};

use crate::error::MergeResult;

/// A chain produced by [`flatten`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flattened {
    /// Head of the combined chain, `None` if every input was empty.
    pub head: Option<NodeId>,
    /// Total number of nodes in the chain.
    pub len: usize,
    /// Number of input heads seen, empty ones included.
    pub inputs: usize,
    /// Number of input heads that were non-empty.
    pub non_empty: usize,
}

/// Concatenate `lists` into one chain, in input order, and count its nodes.
///
/// Each non-empty list is walked to its tail once; the tail is then linked
/// to the head of the next non-empty list. Empty lists are skipped. The
/// count comes out of the same pass, so the chain is never walked twice.
pub fn flatten<T, I>(arena: &mut NodeArena<T>, lists: I) -> MergeResult<Flattened>
where
    I: IntoIterator<Item = Option<NodeId>>,
{
    let mut out = Flattened::default();
    let mut tail: Option<NodeId> = None;

    for list in lists {
        out.inputs += 1;
        let Some(head) = list else { continue };
        out.non_empty += 1;

        let (last, len) = walk_to_tail(arena, head)?;
        match tail {
            Some(prev) => {
                arena.set_next(prev, Some(head))?;
            }
            None => out.head = Some(head),
        }
        tail = Some(last);
        out.len += len;
    }

    Ok(out)
}

/// Last node of the list at `head` and the number of nodes in it.
fn walk_to_tail<T>(arena: &NodeArena<T>, head: NodeId) -> MergeResult<(NodeId, usize)> {
    let mut cursor = head;
    let mut len = 1;
    while let Some(next) = arena.next(cursor)? {
        cursor = next;
        len += 1;
    }
    Ok((cursor, len))
}
