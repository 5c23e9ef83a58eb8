//! Three-way tree merge
//!
//! Every path present in the split, HEAD or target tree is classified on its own:
//!
//! | HEAD vs split | target vs split | outcome            |
//! |---------------|-----------------|--------------------|
//! | unchanged     | unchanged       | keep               |
//! | unchanged     | changed         | take target's side |
//! | changed       | unchanged       | keep               |
//! | same change as target           || keep               |
//! | different changes               || conflict           |
//!
//! A deletion counts as a change.

use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::{BufMut, Bytes, BytesMut};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

const CONFLICT_HEAD_MARKER: &[u8] = b"<<<<<<< HEAD\n";
const CONFLICT_SEPARATOR: &[u8] = b"=======\n";
const CONFLICT_TARGET_MARKER: &[u8] = b">>>>>>>\n";

/// What happens to one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMerge {
    /// Take the target's version, `None` meaning the target deleted the path
    TakeTarget(Option<ObjectId>),
    /// Both sides changed the path differently, `None` meaning that side deleted it
    Conflict {
        head: Option<ObjectId>,
        target: Option<ObjectId>,
    },
}

/// Paths whose HEAD version does not survive the merge as is
///
/// Paths absent from this plan keep their HEAD version.
pub type MergePlan = BTreeMap<PathBuf, PathMerge>;

pub struct TreeMerge<'t> {
    split: &'t Tree,
    head: &'t Tree,
    target: &'t Tree,
}

impl<'t> TreeMerge<'t> {
    pub fn new(split: &'t Tree, head: &'t Tree, target: &'t Tree) -> Self {
        Self {
            split,
            head,
            target,
        }
    }

    pub fn plan(&self) -> MergePlan {
        let paths = self
            .split
            .keys()
            .chain(self.head.keys())
            .chain(self.target.keys())
            .collect::<BTreeSet<_>>();

        paths
            .into_iter()
            .filter_map(|path| {
                let split = self.split.get(path);
                let head = self.head.get(path);
                let target = self.target.get(path);

                Self::merge_path(split, head, target).map(|merge| (path.clone(), merge))
            })
            .collect()
    }

    fn merge_path(
        split: Option<&ObjectId>,
        head: Option<&ObjectId>,
        target: Option<&ObjectId>,
    ) -> Option<PathMerge> {
        if head == target || target == split {
            None
        } else if head == split {
            Some(PathMerge::TakeTarget(target.cloned()))
        } else {
            Some(PathMerge::Conflict {
                head: head.cloned(),
                target: target.cloned(),
            })
        }
    }
}

/// Both versions of a conflicted file, delimited by conflict markers
///
/// A deleted side contributes empty content.
pub fn conflict_content(head: &[u8], target: &[u8]) -> Bytes {
    let mut content = BytesMut::with_capacity(
        CONFLICT_HEAD_MARKER.len()
            + head.len()
            + CONFLICT_SEPARATOR.len()
            + target.len()
            + CONFLICT_TARGET_MARKER.len(),
    );

    content.put_slice(CONFLICT_HEAD_MARKER);
    content.put_slice(head);
    content.put_slice(CONFLICT_SEPARATOR);
    content.put_slice(target);
    content.put_slice(CONFLICT_TARGET_MARKER);

    content.freeze()
}
