use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::errors::BitletError;
use std::io::Write;

impl Repository {
    /// Print the id of every commit with exactly this message
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut matches = Vec::new();

        for entry in RevList::from_all_branches(self)? {
            let (commit_oid, commit) = entry?;
            if commit.message() == message {
                matches.push(commit_oid);
            }
        }

        if matches.is_empty() {
            return Err(BitletError::NoCommitFound(message.to_string()).into());
        }

        for commit_oid in matches {
            writeln!(self.writer(), "{}", commit_oid)?;
        }

        Ok(())
    }
}
