//! Stateful parts of a repository
//!
//! - `commit_graph`: commit storage and abbreviated-id resolution
//! - `database`: content-addressed blob storage
//! - `index`: staging area (additions and removals for the next commit)
//! - `refs`: branches and HEAD
//! - `repository`: ties the areas together for the commands
//! - `workspace`: working directory file system operations

pub(crate) mod commit_graph;
pub(crate) mod database;
pub(crate) mod index;
pub(crate) mod refs;
pub mod repository;
pub(crate) mod workspace;
