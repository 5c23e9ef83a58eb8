use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::BitletError;

impl Repository {
    /// Create a branch pointing at the HEAD commit, without switching to it
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head_oid = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &head_oid)?;

        Ok(())
    }

    /// Delete a branch pointer; its commits stay in the graph
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| BitletError::NoSuchBranchToRemove(branch_name.to_string()))?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(BitletError::CannotRemoveCurrentBranch(branch_name.to_string()).into());
        }

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
