use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::BitletError;

impl Repository {
    /// Stage the current content of a working-directory file
    ///
    /// Adding a file whose content matches the HEAD commit drops any change staged for it,
    /// including a staged removal.
    pub async fn add(&mut self, path: &str) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        // Load the staging area from the disk
        index.rehydrate()?;

        let file_path = self.workspace().relative_path(path)?;
        if file_path.as_os_str().is_empty() || !self.workspace().is_file(&file_path) {
            return Err(BitletError::FileNotFound(path.to_string()).into());
        }

        let blob = self.workspace().parse_blob(&file_path)?;
        let blob_id = blob.object_id()?;

        let head_tree = self.head_tree()?;
        if head_tree.get(&file_path) == Some(&blob_id) {
            index.unstage(&file_path);
            index.unstage_removal(&file_path);
        } else {
            self.database().store(blob)?;
            index.stage(file_path, blob_id);
        }

        index.write_updates()?;

        Ok(())
    }
}
