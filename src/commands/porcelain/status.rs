use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusInfo;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        let status = self.inspect_status().initialize(&index).await?;
        self.print_status(&status)
    }

    fn print_status(&self, status: &StatusInfo) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in &status.branches {
            if branch == &status.current_branch {
                writeln!(writer, "{}", format!("*{}", branch).green())?;
            } else {
                writeln!(writer, "{}", branch)?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for path in &status.staged_files {
            writeln!(writer, "{}", path.display().to_string().green())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for path in &status.removed_files {
            writeln!(writer, "{}", path.display().to_string().green())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for (path, change) in &status.workspace_changeset {
            writeln!(writer, "{} {}", path.display(), change)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for path in &status.untracked_files {
            writeln!(writer, "{}", path.display().to_string().red())?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
