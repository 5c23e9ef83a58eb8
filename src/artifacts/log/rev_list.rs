use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

/// First-parent history of one or more starting commits
///
/// Each commit is yielded once, even when several starting commits share history. A walk from
/// a single commit ends at the root commit.
pub struct RevList<'r> {
    repository: &'r Repository,
    start_commits: VecDeque<ObjectId>,
    current_commit_oid: Option<ObjectId>,
    seen: HashSet<ObjectId>,
}

impl<'r> RevList<'r> {
    pub fn new(repository: &'r Repository, start_commits: Vec<ObjectId>) -> Self {
        let mut start_commits = VecDeque::from(start_commits);
        let current_commit_oid = start_commits.pop_front();

        Self {
            repository,
            start_commits,
            current_commit_oid,
            seen: HashSet::new(),
        }
    }

    /// History of the HEAD commit
    pub fn from_head(repository: &'r Repository) -> anyhow::Result<Self> {
        Ok(Self::new(repository, vec![repository.refs().read_head()?]))
    }

    /// History of every branch tip
    pub fn from_all_branches(repository: &'r Repository) -> anyhow::Result<Self> {
        Ok(Self::new(repository, repository.refs().branch_tips()?))
    }

    fn next_unseen_oid(&mut self) -> Option<ObjectId> {
        loop {
            match self.current_commit_oid.take() {
                Some(oid) if self.seen.insert(oid.clone()) => return Some(oid),
                // reached history already yielded from an earlier start
                Some(_) => self.current_commit_oid = self.start_commits.pop_front(),
                None if self.start_commits.is_empty() => return None,
                None => self.current_commit_oid = self.start_commits.pop_front(),
            }
        }
    }
}

impl Iterator for RevList<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.next_unseen_oid()?;

        match self.repository.commit_graph().get(&commit_oid) {
            Ok(commit) => {
                // Move to the parent commit for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(error) => {
                // a broken history is reported once, then the walk ends
                self.current_commit_oid = None;
                self.start_commits.clear();
                Some(Err(error))
            }
        }
    }
}
