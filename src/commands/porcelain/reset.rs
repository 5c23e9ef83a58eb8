use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use std::io::Write;

impl Repository {
    /// Move the current branch to the given commit and check out its files
    ///
    /// Unlike a branch checkout, the current branch stays the same.
    pub async fn reset(&mut self, commit: &str) -> anyhow::Result<()> {
        let target_oid = self.commit_graph().resolve(commit)?;
        let target_commit = self.commit_graph().get(&target_oid)?;

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        let head_tree = self.head_tree()?;

        let migration = Migration::plan(self, &head_tree, target_commit.tree())?;
        migration.apply_changes()?;

        self.refs().update_head(&target_oid)?;
        index.clear();
        index.write_updates()?;

        writeln!(
            self.writer(),
            "HEAD is now at {} {}",
            target_oid.to_short_oid(),
            target_commit.message().lines().next().unwrap_or_default()
        )?;

        Ok(())
    }
}
