//! Split point finder for merges
//!
//! The split point of two commits is their best common ancestor:
//! > A best common ancestor of commits X and Y is any common ancestor of X and Y
//! > that is not an ancestor of any other common ancestor.
//!
//! ## Algorithm
//!
//! 1. Mark every ancestor of the target commit (the tip of the branch being merged in)
//! 2. Walk breadth-first from the source commit (HEAD), first parents before second parents.
//!    A commit already marked from the target side is a common ancestor: record it and do not
//!    walk past it, everything behind it is an older common ancestor
//! 3. Drop the recorded ancestors that are reachable from another recorded ancestor
//!
//! When several best common ancestors remain (criss-cross histories), the one discovered first
//! from HEAD's side wins.
//!
//! ## Debug Logging
//!
//! Build with `--features debug_merge` to trace the visit states on stderr.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Macro for debug logging that is enabled with the debug_merge feature flag
///
/// # Usage
/// ```rust,ignore
/// debug_log!("Processing commit {}", commit_id);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const RESULT = 0b100;
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::RESULT) {
            flags.push("RESULT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Finds the split point of two commits
///
/// Takes a function loading the parents of any commit, so it works the same on the on-disk
/// commit graph and on in-memory graphs.
pub struct BCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> BCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Finds the best common ancestor of `source_commit_id` and `target_commit_id`
    ///
    /// # Returns
    ///
    /// - `Some(ObjectId)` - the split point; it is `source_commit_id` itself when the target
    ///   descends from it, and `target_commit_id` when the source descends from it
    /// - `None` - if the commits share no history
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// // Branched history:
    /// //     A
    /// //    / \
    /// //   B   C
    /// let bca = finder.find_best_common_ancestor(&b, &c)?;
    /// assert_eq!(bca, Some(a));
    /// ```
    pub fn find_best_common_ancestor(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut states = self
            .ancestors_of(target_commit_id)?
            .into_iter()
            .map(|oid| (oid, VisitState::VISITED_FROM_TARGET))
            .collect::<HashMap<_, _>>();

        let common_ancestors = self.find_common_ancestors(source_commit_id, &mut states)?;

        debug_log!(
            "Final ancestors states: {}",
            states
                .iter()
                .map(|(oid, state)| format!("{}: {}", oid, state))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let redundant_ancestors = self.find_redundant_ancestors(&common_ancestors)?;

        debug_log!(
            "Redundant ancestors: {}",
            redundant_ancestors
                .iter()
                .map(|oid| oid.as_ref())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let best_common_ancestor = common_ancestors
            .into_iter()
            .find(|commit| !redundant_ancestors.contains(commit));

        debug_log!("Best common ancestor: {:?}", best_common_ancestor);

        Ok(best_common_ancestor)
    }

    /// Common ancestors met while walking from `source_commit_id`, in discovery order
    fn find_common_ancestors(
        &self,
        source_commit_id: &ObjectId,
        states: &mut HashMap<ObjectId, VisitState>,
    ) -> anyhow::Result<Vec<ObjectId>> {
        let mut common_ancestors = Vec::new();
        let mut queue = VecDeque::from([source_commit_id.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            let state = states.entry(commit_id.clone()).or_insert(VisitState::NONE);

            if state.contains(VisitState::VISITED_FROM_SOURCE) {
                continue;
            }
            *state |= VisitState::VISITED_FROM_SOURCE;

            debug_log!("Processing commit {}: state={}", &commit_id, state);

            if state.contains(VisitState::VISITED_FROM_TARGET) {
                *state |= VisitState::RESULT;
                common_ancestors.push(commit_id);
                continue;
            }

            let commit = (self.commit_loader)(&commit_id)?;
            queue.extend(commit.parents);
        }

        Ok(common_ancestors)
    }

    /// Common ancestors reachable from another common ancestor
    fn find_redundant_ancestors(
        &self,
        common_ancestors: &[ObjectId],
    ) -> anyhow::Result<HashSet<ObjectId>> {
        let mut redundant_ancestors = HashSet::new();

        for commit in common_ancestors {
            debug_log!("Evaluating common ancestor {} for redundancy", commit);

            if redundant_ancestors.contains(commit) {
                continue;
            }

            let reachable = self.ancestors_of(commit)?;
            redundant_ancestors.extend(
                common_ancestors
                    .iter()
                    .filter(|other| *other != commit && reachable.contains(*other))
                    .cloned(),
            );
        }

        Ok(redundant_ancestors)
    }

    /// `commit_id` and everything reachable through its parents
    fn ancestors_of(&self, commit_id: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut ancestors = HashSet::new();
        let mut stack = vec![commit_id.clone()];

        while let Some(commit_id) = stack.pop() {
            if !ancestors.insert(commit_id.clone()) {
                continue;
            }

            let commit = (self.commit_loader)(&commit_id)?;
            stack.extend(commit.parents);
        }

        Ok(ancestors)
    }
}
