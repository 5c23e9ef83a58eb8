//! Moving the working directory between snapshots
//!
//! Branch checkout and reset both replace the working directory content of the HEAD tree with
//! the content of another tree. Every collision with an untracked file is detected before the
//! first file is touched, so a refused checkout leaves the working directory exactly as it was.

pub mod conflict;
pub mod migration;
