//! User-facing commands
//!
//! - `init`: create a repository with its root commit
//! - `add`: stage a file
//! - `commit`: record the staged changes
//! - `rm`: unstage a file or stage its removal
//! - `log`: first-parent history of HEAD
//! - `global-log`: every commit reachable from a branch
//! - `find`: commit ids by exact message
//! - `status`: branches, staged and removed files, unstaged changes, untracked files
//! - `checkout`: restore a file or switch branches
//! - `branch` / `rm-branch`: create or delete a branch
//! - `reset`: move the current branch to a commit
//! - `merge`: merge a branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
