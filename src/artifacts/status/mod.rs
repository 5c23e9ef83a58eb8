//! Working tree status inspection
//!
//! Compares the staging area, the HEAD tree and the working directory.
//!
//! ## Components
//!
//! - `file_change`: how a file differs from what would be committed
//! - `inspector`: content comparisons against the working directory
//! - `status_info`: the four-way classification shown by `status`

pub mod file_change;
pub mod inspector;
pub mod status_info;
