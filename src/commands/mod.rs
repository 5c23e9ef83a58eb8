//! Command implementations
//!
//! Every command is an `impl Repository` method under `porcelain`; `main` only parses the
//! command line and maps the outcome to an exit code.

pub mod porcelain;
