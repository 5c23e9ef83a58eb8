//! User-facing error types
//!
//! Every expected failure of a command is a [`BitletError`]. These are reported to the user as a
//! single line and never leave the repository half-updated where an operation promises not to.
//!
//! Anything else travelling through `anyhow::Error` (I/O failures, corrupt index files, missing
//! objects) is treated as an internal error by the binary.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitletError {
    #[error("A Bitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Not in an initialized Bitlet directory.")]
    NotInitialized,

    #[error("File does not exist.")]
    FileNotFound(String),

    #[error("Please enter a commit message.")]
    EmptyCommitMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No reason to remove the file.")]
    NothingToRemove(String),

    #[error("No commit with that id exists.")]
    NoSuchCommit(String),

    #[error("Commit id '{prefix}' is ambiguous; candidates are:\n{}", .candidates.iter().map(|oid| oid.as_ref()).collect::<Vec<_>>().join("\n"))]
    AmbiguousCommitId {
        prefix: String,
        candidates: Vec<ObjectId>,
    },

    #[error("File does not exist in that commit.")]
    FileNotTracked(String),

    #[error("No such branch exists.")]
    NoSuchBranch(String),

    #[error("A branch with that name does not exist.")]
    NoSuchBranchToRemove(String),

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch(String),

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists(String),

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch(String),

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileWouldBeOverwritten(Vec<String>),

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    CannotMergeWithSelf,

    #[error("Given branch is an ancestor of the current branch.")]
    AlreadyUpToDate,

    #[error("Found no commit with that message.")]
    NoCommitFound(String),
}

impl BitletError {
    /// Errors that mean "the command had nothing to do" rather than "the command was wrong".
    pub fn is_nothing_to_do(&self) -> bool {
        matches!(
            self,
            BitletError::NothingToCommit
                | BitletError::NothingToRemove(_)
                | BitletError::AlreadyOnBranch(_)
                | BitletError::AlreadyUpToDate
        )
    }
}

/// Failures of the persisted object storage
///
/// These never come from user input: an id read from refs, the index or a commit points to
/// an object that is not (or no longer) in the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("object {0} not found in {1}")]
    ObjectNotFound(ObjectId, String),

    #[error("object {oid} is a {actual}, expected a {expected}")]
    UnexpectedObjectType {
        oid: ObjectId,
        expected: String,
        actual: String,
    },
}
