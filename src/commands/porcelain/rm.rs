use crate::areas::repository::Repository;
use crate::errors::BitletError;

impl Repository {
    /// Unstage a file, and stop tracking it if the HEAD commit does
    ///
    /// A tracked file is also deleted from the working directory.
    pub async fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        // Load the staging area from the disk
        index.rehydrate()?;

        let file_path = self.workspace().relative_path(path)?;
        let head_tree = self.head_tree()?;

        let was_staged = index.unstage(&file_path);
        if head_tree.contains_key(&file_path) {
            index.stage_removal(file_path.clone());
            self.workspace().remove_file(&file_path)?;
        } else if !was_staged {
            return Err(BitletError::NothingToRemove(path.to_string()).into());
        }

        index.write_updates()?;

        Ok(())
    }
}
