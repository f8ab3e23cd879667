//! Hashing utilities for deterministic key derivation.
//!
//! This module provides:
//! - `ContentHash`: a full 64-character SHA-256 hex digest
//! - `hash_bytes()`: arbitrary byte hashing
//! - `hash_strings()`: unambiguous hashing of a string list

use sha2::{Digest, Sha256};

/// A full 64-character SHA256 hash.
///
/// # Format
///
/// The hash is a lowercase hexadecimal string (64 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(pub String);

impl ContentHash {
  /// Returns at most the first `len` characters of the digest.
  pub fn truncated(&self, len: usize) -> &str {
    &self.0[..len.min(self.0.len())]
  }
}

impl std::fmt::Display for ContentHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Hash arbitrary bytes.
///
/// Returns the full 64-character SHA256 hash.
pub fn hash_bytes(data: &[u8]) -> ContentHash {
  let mut hasher = Sha256::new();
  hasher.update(data);
  ContentHash(format!("{:x}", hasher.finalize()))
}

/// Hash an ordered list of strings.
///
/// Every entry is terminated by a NUL byte, so `["ab", "c"]` and `["a", "bc"]`
/// produce different hashes.
pub fn hash_strings<S: AsRef<str>>(parts: &[S]) -> ContentHash {
  let mut hasher = Sha256::new();
  for part in parts {
    hasher.update(part.as_ref().as_bytes());
    hasher.update([0u8]);
  }
  ContentHash(format!("{:x}", hasher.finalize()))
}
