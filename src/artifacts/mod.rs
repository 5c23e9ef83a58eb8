//! Bitlet data structures and algorithms
//!
//! - `branch`: branch names
//! - `checkout`: working directory migrations and untracked file protection
//! - `core`: shared output utilities (pager wrapper)
//! - `index`: staging area file format
//! - `log`: commit history traversal
//! - `merge`: split point search and three-way tree merge
//! - `objects`: object types (blob, commit) and ids
//! - `status`: working directory status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
