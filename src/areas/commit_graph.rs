//! Commit graph
//!
//! Immutable commits keyed by id, stored in their own object directory. Commits reference
//! their parents by id only, so the graph is an append-only arena that is never pruned.

use crate::areas::database::Database;
use crate::artifacts::objects::commit::{Commit, SlimCommit, Tree};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::BitletError;
use chrono::{DateTime, FixedOffset};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug)]
pub struct CommitGraph {
    database: Database,
    /// Commits already parsed during this invocation
    cache: RefCell<HashMap<ObjectId, Commit>>,
}

impl CommitGraph {
    pub fn new(path: Box<Path>) -> Self {
        CommitGraph {
            database: Database::new(path),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn commits_path(&self) -> &Path {
        self.database.objects_path()
    }

    /// Build a commit from all four of its fields and store it
    pub fn create(
        &self,
        parents: Vec<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        message: String,
        tree: Tree,
    ) -> anyhow::Result<ObjectId> {
        self.store(Commit::new(parents, timestamp, message, tree))
    }

    pub fn store(&self, commit: Commit) -> anyhow::Result<ObjectId> {
        let oid = self.database.store(commit.clone())?;
        self.cache.borrow_mut().insert(oid.clone(), commit);

        Ok(oid)
    }

    pub fn get(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        if let Some(commit) = self.cache.borrow().get(oid) {
            return Ok(commit.clone());
        }

        let commit = self.database.parse_object_as_commit(oid)?;
        self.cache.borrow_mut().insert(oid.clone(), commit.clone());

        Ok(commit)
    }

    pub fn slim_commit(&self, oid: &ObjectId) -> anyhow::Result<SlimCommit> {
        let commit = self.get(oid)?;

        Ok(SlimCommit {
            oid: oid.clone(),
            parents: commit.parents().to_vec(),
        })
    }

    /// Resolve a full or abbreviated commit id
    ///
    /// # Errors
    ///
    /// - `NoSuchCommit` if no commit id starts with `prefix` (or `prefix` is not hexadecimal)
    /// - `AmbiguousCommitId` if more than one does
    pub fn resolve(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        if !ObjectId::is_valid_prefix(prefix) {
            return Err(BitletError::NoSuchCommit(prefix.to_string()).into());
        }

        let mut candidates = self.database.find_objects_by_prefix(prefix)?;

        match candidates.len() {
            0 => Err(BitletError::NoSuchCommit(prefix.to_string()).into()),
            1 => Ok(candidates.remove(0)),
            _ => Err(BitletError::AmbiguousCommitId {
                prefix: prefix.to_string(),
                candidates,
            }
            .into()),
        }
    }
}
