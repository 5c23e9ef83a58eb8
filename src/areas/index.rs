//! Staging area
//!
//! Holds the changes that will be folded into the next commit:
//!
//! - `additions`: paths mapped to the blob they will hold in the next commit
//! - `removals`: paths that will be dropped from the next commit
//!
//! A path is never in both at once. The staging area is cleared after every commit, branch
//! checkout and reset.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::staged_change::StagedChange;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the staging file (typically `.bitlet/index`)
    path: Box<Path>,
    additions: BTreeMap<PathBuf, ObjectId>,
    removals: BTreeSet<PathBuf>,
    /// Flag indicating if the staging area has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the staging area from disk
    ///
    /// A missing or empty file is an empty staging area. A file whose checksum does not match
    /// is reported as corrupt.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the staging file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions.clear();
        self.removals.clear();
        self.changed = false;

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let records_count = Self::parse_header(&mut reader)?;

        for _ in 0..records_count {
            match StagedChange::read_from(&mut reader)? {
                StagedChange::Addition { path, oid } => self.stage(path, oid),
                StagedChange::Removal { path } => self.stage_removal(path),
            }
        }
        self.changed = false;

        reader.verify()
    }

    fn parse_header(reader: &mut Checksum) -> anyhow::Result<u32> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header.records_count)
    }

    /// Persist the staging area if it changed since it was loaded
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the staging file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        let records = self.records();
        let header = IndexHeader {
            records_count: records.len() as u32,
            ..IndexHeader::empty()
        };
        writer.write(&header.serialize()?)?;

        for record in records {
            writer.write(&record.serialize()?)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        Ok(())
    }

    fn records(&self) -> Vec<StagedChange> {
        self.additions
            .iter()
            .map(|(path, oid)| StagedChange::Addition {
                path: path.clone(),
                oid: oid.clone(),
            })
            .chain(
                self.removals
                    .iter()
                    .map(|path| StagedChange::Removal { path: path.clone() }),
            )
            .collect()
    }

    /// Stage `path` to hold `oid` in the next commit, cancelling a staged removal
    pub fn stage(&mut self, path: PathBuf, oid: ObjectId) {
        self.removals.remove(&path);
        self.additions.insert(path, oid);
        self.changed = true;
    }

    /// Stage `path` for removal, cancelling a staged addition
    pub fn stage_removal(&mut self, path: PathBuf) {
        self.additions.remove(&path);
        self.removals.insert(path);
        self.changed = true;
    }

    /// Drop a staged addition, returning whether there was one
    pub fn unstage(&mut self, path: &Path) -> bool {
        let removed = self.additions.remove(path).is_some();
        self.changed |= removed;
        removed
    }

    /// Drop a staged removal, returning whether there was one
    pub fn unstage_removal(&mut self, path: &Path) -> bool {
        let removed = self.removals.remove(path);
        self.changed |= removed;
        removed
    }

    pub fn clear(&mut self) {
        self.changed |= !self.is_empty();
        self.additions.clear();
        self.removals.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn additions(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<PathBuf> {
        &self.removals
    }

    pub fn staged_blob(&self, path: &Path) -> Option<&ObjectId> {
        self.additions.get(path)
    }

    pub fn is_staged(&self, path: &Path) -> bool {
        self.additions.contains_key(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.removals.contains(path)
    }
}
