//! Commit object
//!
//! Commits represent complete snapshots of the tracked files at specific points in time.
//! They contain:
//! - Parent commit ID(s) (none for the root commit, two for a merge commit)
//! - The commit timestamp
//! - The full tree: every tracked path mapped to the blob holding its content
//! - The commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! date <unix-seconds> <timezone>
//! file <blob-sha> <path>
//!
//! <commit message>
//! ```
//!
//! The object id is the hash of this whole serialization, so two commits with the same
//! parents, timestamp and message but different trees never share an id.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Timelike, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Message of the commit created by `init`
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "BITLET_COMMIT_DATE";

/// Snapshot mapping from repository-relative path to blob id
pub type Tree = BTreeMap<PathBuf, ObjectId>;

/// Parents of a commit, all that the split point search needs to know about it
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
}

/// Immutable node of the commit graph
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs (empty for the root commit, two for merge commits)
    parents: Vec<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    message: String,
    tree: Tree,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        message: String,
        tree: Tree,
    ) -> Self {
        // the serialized form keeps whole seconds only
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);

        Commit {
            parents,
            timestamp,
            message,
            tree,
        }
    }

    /// The commit every repository starts from
    ///
    /// It has no parents, an empty tree and the unix epoch as timestamp, so its id is the
    /// same in every repository.
    pub fn root() -> Self {
        Commit::new(
            Vec::new(),
            DateTime::<Utc>::default().fixed_offset(),
            ROOT_COMMIT_MESSAGE.to_string(),
            Tree::new(),
        )
    }

    /// Timestamp for a new commit
    ///
    /// Reads `BITLET_COMMIT_DATE` if set and parseable, otherwise uses the current local time.
    pub fn timestamp_from_env() -> DateTime<FixedOffset> {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date_str| {
                DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .ok()
            })
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent, the one followed by `log`
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn blob_for(&self, path: &Path) -> Option<&ObjectId> {
        self.tree.get(path)
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.tree.contains_key(path)
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    fn body(&self) -> anyhow::Result<String> {
        let mut lines = vec![];

        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (path, oid) in &self.tree {
            let path = path
                .to_str()
                .with_context(|| format!("Path {} is not valid UTF-8", path.display()))?;
            lines.push(format!("file {} {}", oid.as_ref(), path));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        Ok(lines.join("\n"))
    }

    fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        let (seconds, timezone) = value
            .split_once(' ')
            .context("Invalid commit object: invalid date line")?;
        let seconds = seconds
            .parse::<i64>()
            .context("Invalid commit object: invalid timestamp")?;

        let offset = *DateTime::parse_from_str(
            &format!("1970-01-01 00:00:00 {timezone}"),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .context("Invalid commit object: invalid timezone")?
        .offset();

        let utc = DateTime::from_timestamp(seconds, 0)
            .context("Invalid commit object: timestamp out of range")?;

        Ok(utc.with_timezone(&offset))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(frame(&self.object_type(), self.body()?.as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parents = Vec::new();
        let mut timestamp = None;
        let mut tree = Tree::new();

        for line in header.lines() {
            if let Some(parent) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent.to_string())?);
            } else if let Some(date) = line.strip_prefix("date ") {
                timestamp = Some(Self::parse_timestamp(date)?);
            } else if let Some(entry) = line.strip_prefix("file ") {
                let (oid, path) = entry
                    .split_once(' ')
                    .context("Invalid commit object: invalid file line")?;
                tree.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {line:?}");
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing date line")?;

        Ok(Self::new(parents, timestamp, message.to_string(), tree))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.body().unwrap_or_default()
    }
}
