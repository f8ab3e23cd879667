//! Cache key derivation for glob queries.
//!
//! Keys double as marker file names, so they only contain `[A-Za-z0-9_-/]`.
//! They are reproducible across runs but not collision-free: `src/*.c` and
//! `src/?.c` share a key. The cache checks for that.

use crate::consts::{GLOB_EXCLUDE_HASH_LEN, MAX_GLOB_KEY_SEPARATORS};
use crate::util::hash::hash_strings;

/// Replace every character outside `[A-Za-z0-9_-/]` with `_`.
pub fn sanitize(pattern: &str) -> String {
  pattern
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/') {
        c
      } else {
        '_'
      }
    })
    .collect()
}

/// Derive the cache key for a glob query.
///
/// The key is the sanitized pattern followed by `__<sanitized exclude>` for
/// each exclude. When the key would carry more than
/// [`MAX_GLOB_KEY_SEPARATORS`] separators, the exclude part is replaced by
/// `___` and a hash of the excludes.
pub fn glob_key(pattern: &str, excludes: &[String]) -> String {
  let name = sanitize(pattern);
  let mut exclude_name: String = excludes.iter().map(|e| format!("__{}", sanitize(e))).collect();

  if name.matches('/').count() + exclude_name.matches('/').count() > MAX_GLOB_KEY_SEPARATORS {
    exclude_name = format!("___{}", hash_strings(excludes).truncated(GLOB_EXCLUDE_HASH_LEN));
  }

  name + &exclude_name
}
