use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// First-parent history of the HEAD commit, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        for entry in RevList::from_head(self)? {
            let (commit_oid, commit) = entry?;
            self.display_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    /// Every commit on the first-parent history of any branch, each shown once
    pub fn global_log(&self) -> anyhow::Result<()> {
        for entry in RevList::from_all_branches(self)? {
            let (commit_oid, commit) = entry?;
            self.display_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    pub(crate) fn display_commit(
        &self,
        commit_oid: &ObjectId,
        commit: &Commit,
    ) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "{}", format!("commit {}", commit_oid).yellow())?;
        if let [first_parent, second_parent, ..] = commit.parents() {
            writeln!(
                writer,
                "Merge: {} {}",
                first_parent.to_short_oid(),
                second_parent.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
