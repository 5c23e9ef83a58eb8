use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, Tree};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::BitletError;
use std::io::Write;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        if message.trim().is_empty() {
            return Err(BitletError::EmptyCommitMessage.into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        // Load the staging area from the disk
        index.rehydrate()?;

        if index.is_empty() {
            return Err(BitletError::NothingToCommit.into());
        }

        let (head_oid, head_commit) = self.head_commit()?;
        let commit_id = self.commit_staged(
            &mut index,
            vec![head_oid],
            message.to_string(),
            head_commit.tree(),
        )?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            self.refs().current_branch()?,
            commit_id.to_short_oid(),
            message.lines().next().unwrap_or_default()
        )?;

        Ok(commit_id)
    }

    /// Fold the staging area into `parent_tree`, record the result as a new commit on the
    /// current branch and clear the staging area
    pub(crate) fn commit_staged(
        &self,
        index: &mut Index,
        parents: Vec<ObjectId>,
        message: String,
        parent_tree: &Tree,
    ) -> anyhow::Result<ObjectId> {
        let tree = Self::build_tree(parent_tree, index);

        let commit_id =
            self.commit_graph()
                .create(parents, Commit::timestamp_from_env(), message, tree)?;
        self.refs().update_head(&commit_id)?;

        index.clear();
        index.write_updates()?;

        Ok(commit_id)
    }

    fn build_tree(parent_tree: &Tree, index: &Index) -> Tree {
        let mut tree = parent_tree.clone();

        for path in index.removals() {
            tree.remove(path);
        }

        for (path, blob_id) in index.additions() {
            tree.insert(path.clone(), blob_id.clone());
        }

        tree
    }
}
