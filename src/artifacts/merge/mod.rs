//! Merging branches
//!
//! - `bca_finder`: split point (best common ancestor) search over the commit graph
//! - `tree_merge`: per-path three-way merge of the split, HEAD and target trees

pub mod bca_finder;
pub mod tree_merge;

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// How a merge ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// HEAD was an ancestor of the target: the current branch now points at the target tip
    FastForward(ObjectId),
    /// A merge commit was created
    Clean(ObjectId),
    /// These paths hold conflict markers and are staged; no commit was created
    Conflicted(Vec<PathBuf>),
}
