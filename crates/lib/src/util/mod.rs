//! Shared utilities.
//!
//! Hashing, dependency-file writing, escaping and path-list helpers used
//! across the crate.

pub mod depfile;
pub mod escape;
pub mod hash;
pub mod paths;
