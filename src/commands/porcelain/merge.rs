use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::conflict::{IncomingContent, UntrackedOverwriteCheck};
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::MergeOutcome;
use crate::artifacts::merge::bca_finder::BCAFinder;
use crate::artifacts::merge::tree_merge::{MergePlan, PathMerge, TreeMerge, conflict_content};
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::BitletError;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};

impl Repository {
    pub async fn merge(&mut self, target: &str) -> anyhow::Result<MergeOutcome> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        if !index.is_empty() {
            return Err(BitletError::UncommittedChanges.into());
        }

        let target_branch = BranchName::try_parse(target.to_string())
            .map_err(|_| BitletError::NoSuchBranch(target.to_string()))?;
        let target_oid = self
            .refs()
            .read_branch(&target_branch)?
            .ok_or_else(|| BitletError::NoSuchBranch(target.to_string()))?;

        if self.refs().is_current_branch(&target_branch)? {
            return Err(BitletError::CannotMergeWithSelf.into());
        }

        let current_branch = self.refs().current_branch()?;
        let (head_oid, head_commit) = self.head_commit()?;

        let split_oid = BCAFinder::new(|oid: &ObjectId| self.commit_graph().slim_commit(oid))
            .find_best_common_ancestor(&head_oid, &target_oid)?
            .with_context(|| {
                format!(
                    "no common ancestor between {} and {}",
                    current_branch, target_branch
                )
            })?;

        if split_oid == target_oid {
            return Err(BitletError::AlreadyUpToDate.into());
        }

        let target_commit = self.commit_graph().get(&target_oid)?;

        if split_oid == head_oid {
            let migration = Migration::plan(self, head_commit.tree(), target_commit.tree())?;
            migration.apply_changes()?;

            self.refs().update_head(&target_oid)?;
            index.clear();
            index.write_updates()?;

            writeln!(self.writer(), "Current branch fast-forwarded.")?;

            return Ok(MergeOutcome::FastForward(target_oid));
        }

        let split_commit = self.commit_graph().get(&split_oid)?;
        let plan = TreeMerge::new(
            split_commit.tree(),
            head_commit.tree(),
            target_commit.tree(),
        )
        .plan();

        self.ensure_merge_safe(head_commit.tree(), &plan)?;

        let conflicts = self.apply_merge_plan(&mut index, &plan)?;

        if conflicts.is_empty() {
            let merge_oid = self.commit_staged(
                &mut index,
                vec![head_oid, target_oid],
                format!("Merged {} into {}.", target_branch, current_branch),
                head_commit.tree(),
            )?;

            Ok(MergeOutcome::Clean(merge_oid))
        } else {
            index.write_updates()?;

            writeln!(self.writer(), "Encountered a merge conflict.")?;

            Ok(MergeOutcome::Conflicted(conflicts))
        }
    }

    fn ensure_merge_safe(&self, head_tree: &Tree, plan: &MergePlan) -> anyhow::Result<()> {
        let incoming = plan.iter().filter_map(|(path, merge)| {
            let content = match merge {
                PathMerge::TakeTarget(Some(oid)) => IncomingContent::Blob(oid),
                PathMerge::TakeTarget(None) => return None,
                PathMerge::Conflict { .. } => IncomingContent::Generated,
            };

            Some((path.as_path(), content))
        });

        UntrackedOverwriteCheck::new(self.workspace(), head_tree).ensure_no_collisions(incoming)
    }

    /// Write and stage every planned path, returning the conflicted ones
    fn apply_merge_plan(
        &self,
        index: &mut Index,
        plan: &MergePlan,
    ) -> anyhow::Result<Vec<PathBuf>> {
        let mut conflicts = Vec::new();

        // deletions first, a deleted file may be in the way of a new directory
        for (path, merge) in plan {
            if merge == &PathMerge::TakeTarget(None) {
                self.workspace().remove_file(path)?;
                index.stage_removal(path.clone());
            }
        }

        for (path, merge) in plan {
            match merge {
                PathMerge::TakeTarget(Some(oid)) => {
                    let data = self.database().get(oid)?;
                    self.workspace().write_file(path, &data)?;
                    index.stage(path.clone(), oid.clone());
                }
                PathMerge::TakeTarget(None) => {}
                PathMerge::Conflict { head, target } => {
                    let content = conflict_content(
                        &self.side_content(head.as_ref())?,
                        &self.side_content(target.as_ref())?,
                    );
                    let oid = self.database().put(content.clone())?;

                    self.write_conflicted(path, &content)?;
                    index.stage(path.clone(), oid);
                    conflicts.push(path.clone());
                }
            }
        }

        Ok(conflicts)
    }

    fn side_content(&self, oid: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match oid {
            Some(oid) => self.database().get(oid),
            None => Ok(Bytes::new()),
        }
    }

    fn write_conflicted(&self, path: &Path, content: &Bytes) -> anyhow::Result<()> {
        self.workspace()
            .write_file(path, content)
            .with_context(|| format!("writing conflicted file {}", path.display()))
    }
}
