//! Branch and HEAD registry
//!
//! Branches are human-readable names pointing to commits, stored as text files under
//! `refs/heads/` holding the 40-character id of the branch tip. `HEAD` is a symbolic reference
//! (`ref: refs/heads/<branch>`) naming the current branch, so the HEAD commit is always the tip
//! of the current branch.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::BitletError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Branch registry rooted at the metadata directory
///
/// Writes go through an exclusive file lock on the ref being written.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.bitlet`)
    path: Box<Path>,
}

impl Refs {
    /// Create the default branch at `root` and make it current
    pub fn init(&self, root: &ObjectId) -> anyhow::Result<()> {
        let default_branch = BranchName::default_branch();

        std::fs::create_dir_all(self.heads_path())
            .with_context(|| format!("failed to create {:?}", self.heads_path()))?;
        self.write_ref_file(self.branch_path(&default_branch), root.as_ref())?;
        self.set_head(&default_branch)
    }

    /// Name of the branch `HEAD` points to
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let content = std::fs::read_to_string(self.head_path())
            .with_context(|| format!("failed to read HEAD at {:?}", self.head_path()))?;

        let re = regex::Regex::new(SYMREF_REGEX)?;
        let captures = re
            .captures(content.trim())
            .with_context(|| format!("HEAD is not a symbolic reference: {:?}", content.trim()))?;

        BranchName::try_parse_sym_ref(&captures[1])
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    /// Id of the HEAD commit
    ///
    /// A dangling `HEAD` means the metadata directory is corrupt.
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let current_branch = self.current_branch()?;

        self.read_branch(&current_branch)?.with_context(|| {
            format!("HEAD points to the missing branch {current_branch}")
        })
    }

    /// Move the current branch (and therefore `HEAD`) to `oid`
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let current_branch = self.current_branch()?;

        self.write_ref_file(self.branch_path(&current_branch), oid.as_ref())
    }

    /// Make `branch_name` the current branch
    pub fn set_head(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        self.write_ref_file(
            self.head_path(),
            &format!("ref: {}", branch_name.sym_ref()),
        )
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);

        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: &ObjectId) -> anyhow::Result<()> {
        let branch_path = self.branch_path(name);

        // a file or a directory in the way both mean the name is taken
        if branch_path.exists() {
            return Err(BitletError::BranchAlreadyExists(name.to_string()).into());
        }

        self.write_ref_file(branch_path, source_oid.as_ref())
    }

    /// Delete the branch pointer only; the commits it pointed to stay in the graph
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let branch_path = self.branch_path(name);

        let oid = self
            .read_branch(name)?
            .ok_or_else(|| BitletError::NoSuchBranchToRemove(name.to_string()))?;

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;

        Ok(oid)
    }

    /// All branches, sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative_path.to_str()?.replace(std::path::MAIN_SEPARATOR, "/");
                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    /// Tips of every branch, de-duplicated
    pub fn branch_tips(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut tips = Vec::new();

        for branch in self.list_branches()? {
            if let Some(oid) = self.read_branch(&branch)?
                && !tips.contains(&oid)
            {
                tips.push(oid);
            }
        }

        Ok(tips)
    }

    fn write_ref_file(&self, path: impl AsRef<Path>, raw_ref: &str) -> anyhow::Result<()> {
        let path = path.as_ref();

        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!("failed to create parent directories for ref file at {:?}", path)
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.path.join(branch_name.sym_ref()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.path.join("refs").join("heads").into_boxed_path()
    }
}
