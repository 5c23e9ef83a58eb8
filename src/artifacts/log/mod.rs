//! Commit history traversal
//!
//! - `rev_list`: lazy first-parent walk from one or more starting commits
//!
//! A walk reads the commit graph as it goes, so a new walk must be started after any commit is
//! created.

pub mod rev_list;
