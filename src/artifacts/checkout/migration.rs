//! Checkout migration planning
//!
//! A migration turns the working directory content of the HEAD tree into the content of a
//! target tree:
//!
//! 1. Check that no untracked file would be overwritten (nothing is written if one would)
//! 2. Delete every file tracked by HEAD that the target tree does not have
//! 3. Write every file of the target tree, overwriting existing copies
//!
//! Files that neither tree tracks are left alone.

use crate::areas::repository::Repository;
use crate::artifacts::checkout::conflict::{IncomingContent, UntrackedOverwriteCheck};
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub struct Migration<'r> {
    repository: &'r Repository,
    /// Files to (over)write, with the blob holding their new content
    writes: BTreeMap<PathBuf, ObjectId>,
    /// Files to delete
    deletions: BTreeSet<PathBuf>,
}

impl<'r> Migration<'r> {
    /// Plan the move from `head_tree` to `target_tree`
    ///
    /// # Errors
    ///
    /// `UntrackedFileWouldBeOverwritten` if an untracked file holds different content than the
    /// target tree would write to it. No file has been touched at that point.
    pub fn plan(
        repository: &'r Repository,
        head_tree: &Tree,
        target_tree: &Tree,
    ) -> anyhow::Result<Self> {
        UntrackedOverwriteCheck::new(repository.workspace(), head_tree).ensure_no_collisions(
            target_tree
                .iter()
                .map(|(path, oid)| (path.as_path(), IncomingContent::Blob(oid))),
        )?;

        let deletions = head_tree
            .keys()
            .filter(|path| !target_tree.contains_key(*path))
            .cloned()
            .collect();

        Ok(Self {
            repository,
            writes: target_tree.clone(),
            deletions,
        })
    }

    pub fn writes(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.writes
    }

    pub fn deletions(&self) -> &BTreeSet<PathBuf> {
        &self.deletions
    }

    pub fn apply_changes(&self) -> anyhow::Result<()> {
        self.repository.workspace().apply_migration(self)
    }

    pub fn load_blob_data(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        self.repository.database().get(object_id)
    }
}
