//! K-way merge of sorted linked lists.
//!
//! Merges any number of individually sorted lists stored in a
//! [`NodeArena`](kmerge_list::NodeArena) into one sorted list. The merge
//! never allocates or frees a node; it only rewrites `next` links.
//!
//! The merge runs in two phases:
//!
//! 1. [`flatten`] splices the input lists into one chain and counts its nodes.
//! 2. [`merge_sort`] sorts that chain, splitting by the known count and
//!    merging halves with [`merge`].
//!
//! [`merge_lists`] runs both phases and is the entry point callers want.

pub mod engine;
pub mod error;
pub mod flatten;
pub mod sort;


pub use engine::merge_lists;
pub use error::{MergeError, MergeResult};
pub use flatten::{flatten, Flattened};
pub use sort::{merge, merge_sort};
