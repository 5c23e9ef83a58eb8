//! Staging area file format
//!
//! The staging area is persisted as a single binary file holding the pending additions and
//! removals for the next commit.
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "BITS" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Record count (4 bytes)
//!
//! Records (variable length):
//!   - Addition: 'A', blob id (20 bytes), path, NUL
//!   - Removal:  'R', path, NUL
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod index_header;
pub mod staged_change;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for records_count

/// Magic signature identifying staging files
pub const SIGNATURE: &str = "BITS";

/// Staging file format version
pub const VERSION: u32 = 1;
