//! The k-way merge entry point.

use kmerge_list::{NodeArena, NodeId};
use tracing::debug;

use crate::error::MergeResult;
use crate::flatten::flatten;
use crate::sort::merge_sort;

/// Merge sorted lists into one sorted list and return its head.
///
/// Every input list must be non-decreasing. Empty heads are allowed, and an
/// empty collection or one holding only empty lists yields `None`.
///
/// The merge reuses the input nodes: it rewrites their `next` links and
/// neither allocates nor frees anything in `arena`. The input heads are
/// consumed; afterwards they point into the middle of the merged list and
/// must not be treated as separate lists. Equal values keep the order in
/// which each pairwise merge saw them, left operand first.
///
/// Input lists must be acyclic. A cycle makes the merge loop forever.
pub fn merge_lists<T, I>(arena: &mut NodeArena<T>, lists: I) -> MergeResult<Option<NodeId>>
where
    T: Ord,
    I: IntoIterator<Item = Option<NodeId>>,
{
    let flat = flatten(arena, lists)?;
    debug!(
        lists = flat.inputs,
        non_empty = flat.non_empty,
        nodes = flat.len,
        "flattened input lists"
    );
    if flat.len == 0 {
        return Ok(None);
    }
    merge_sort(arena, flat.head, flat.len)
}
