use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;
pub type FileSet = BTreeSet<PathBuf>;

// Terminology:
// - staged files: staged for addition
// - removed files: staged for removal
// - modifications not staged: content differs from what the next commit would record, or the
//   file is gone from the working directory while still tracked or staged
// - untracked files: in the working directory but neither staged nor tracked by HEAD; a file
//   staged for removal and then re-created counts as untracked too
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) branches: Vec<BranchName>,
    pub(crate) current_branch: BranchName,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub async fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let inspector = Inspector::new(self.repository.workspace());
        let head_tree = self.repository.head_tree()?;

        let workspace_changeset = self.check_tracked_files(&head_tree, index, &inspector)?;
        let untracked_files = self.scan_workspace(&head_tree, index)?;

        Ok(StatusInfo {
            branches: self.repository.refs().list_branches()?,
            current_branch: self.repository.refs().current_branch()?,
            staged_files: index.additions().keys().cloned().collect(),
            removed_files: index.removals().clone(),
            workspace_changeset,
            untracked_files,
        })
    }

    fn check_tracked_files(
        &self,
        head_tree: &Tree,
        index: &Index,
        inspector: &Inspector<'_>,
    ) -> anyhow::Result<ChangeSet> {
        let mut changeset = ChangeSet::new();

        for (path, oid) in index.additions() {
            if let Some(change) = inspector.check_workspace_against(path, oid)? {
                changeset.insert(path.clone(), change);
            }
        }

        for (path, oid) in head_tree {
            if index.is_staged(path) || index.is_staged_for_removal(path) {
                continue;
            }

            if let Some(change) = inspector.check_workspace_against(path, oid)? {
                changeset.insert(path.clone(), change);
            }
        }

        Ok(changeset)
    }

    fn scan_workspace(&self, head_tree: &Tree, index: &Index) -> anyhow::Result<FileSet> {
        Ok(self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|path| {
                index.is_staged_for_removal(path)
                    || (!index.is_staged(path) && !head_tree.contains_key(path))
            })
            .collect())
    }
}
