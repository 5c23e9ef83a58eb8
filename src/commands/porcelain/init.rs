use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::errors::BitletError;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(BitletError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .bitlet/blobs directory")?;

        fs::create_dir_all(self.commit_graph().commits_path())
            .context("Failed to create .bitlet/commits directory")?;

        let root_oid = self
            .commit_graph()
            .store(Commit::root())
            .context("Failed to create the initial commit")?;

        self.refs()
            .init(&root_oid)
            .context("Failed to create the default branch")?;

        let index = self.index();
        let index = index.lock().await;
        // an empty staging file is an empty staging area
        if !index.path().exists() {
            fs::write(index.path(), b"").context("Failed to create .bitlet/index file")?;
        }

        writeln!(
            self.writer(),
            "Initialized empty Bitlet repository in {}",
            self.bitlet_path().display()
        )?;

        Ok(())
    }
}
