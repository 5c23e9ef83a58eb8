use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Commit;
use crate::errors::BitletError;

/// What `checkout` restores
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutTarget {
    /// A single file, as the HEAD commit has it
    File { path: String },
    /// A single file, as the given (possibly abbreviated) commit has it
    CommitFile { commit: String, path: String },
    /// A whole branch, which becomes the current branch
    Branch { name: String },
}

impl Repository {
    pub async fn checkout(&mut self, target: CheckoutTarget) -> anyhow::Result<()> {
        match target {
            CheckoutTarget::File { path } => {
                let (_, head_commit) = self.head_commit()?;
                self.checkout_file(&head_commit, &path)
            }
            CheckoutTarget::CommitFile { commit, path } => {
                let commit_oid = self.commit_graph().resolve(&commit)?;
                let commit = self.commit_graph().get(&commit_oid)?;
                self.checkout_file(&commit, &path)
            }
            CheckoutTarget::Branch { name } => self.checkout_branch(&name).await,
        }
    }

    /// Overwrite one working-directory file with its version in `commit`; nothing is staged
    fn checkout_file(&self, commit: &Commit, path: &str) -> anyhow::Result<()> {
        let file_path = self.workspace().relative_path(path)?;

        let blob_id = commit
            .blob_for(&file_path)
            .ok_or_else(|| BitletError::FileNotTracked(path.to_string()))?;
        let data = self.database().get(blob_id)?;

        self.workspace().write_file(&file_path, &data)
    }

    async fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| BitletError::NoSuchBranch(name.to_string()))?;
        let target_oid = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or_else(|| BitletError::NoSuchBranch(name.to_string()))?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(BitletError::AlreadyOnBranch(name.to_string()).into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        let head_tree = self.head_tree()?;
        let target_commit = self.commit_graph().get(&target_oid)?;

        let migration = Migration::plan(self, &head_tree, target_commit.tree())?;
        migration.apply_changes()?;

        self.refs().set_head(&branch_name)?;
        index.clear();
        index.write_updates()?;

        eprintln!("Switched to branch '{}'", branch_name);

        Ok(())
    }
}
