//! Error types for the merge engine.

use kmerge_list::ListError;

/// Errors that can occur while merging.
///
/// Well-formed input never fails; these only arise from handles that do not
/// resolve in the arena.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// An input head or an interior link did not resolve.
    #[error("list error: {0}")]
    List(#[from] ListError),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
