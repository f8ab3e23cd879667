//! Memoized glob resolution.
//!
//! Every distinct (pattern, excludes) query is resolved through the provider
//! at most once per cache in the common case. Two threads racing on the same
//! query may both scan; the first result stored wins and the other is
//! dropped, so all callers observe identical files.

pub mod artifacts;
mod key;
mod types;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::fault::Fault;

pub use key::{glob_key, sanitize};
pub use types::{GlobError, GlobMatches, GlobPath, GlobProvider};

pub struct GlobCache<P> {
  provider: P,
  globs: Mutex<HashMap<String, GlobPath>>,
}

impl<P: GlobProvider> GlobCache<P> {
  pub fn new(provider: P) -> Self {
    Self {
      provider,
      globs: Mutex::new(HashMap::new()),
    }
  }

  /// Files matching `pattern` minus `excludes`, scanning on first use.
  ///
  /// Raises a [`Fault`] when a different query already owns the derived key.
  /// Provider failures are returned and nothing is cached for them.
  pub fn resolve(&self, pattern: &str, excludes: &[String]) -> Result<Vec<String>, GlobError> {
    let key = glob_key(pattern, excludes);

    let cached = self.lock().get(&key).cloned();
    if let Some(existing) = cached {
      verify(&existing, pattern, excludes);
      trace!(key = %key, "glob cache hit");
      return Ok(existing.files);
    }

    debug!(pattern = %pattern, ?excludes, "scanning glob");
    let matches = self
      .provider
      .glob(pattern, excludes)
      .map_err(|source| GlobError::Provider {
        pattern: pattern.to_string(),
        source,
      })?;

    let raced = match self.lock().entry(key.clone()) {
      Entry::Occupied(entry) => Some(entry.get().clone()),
      Entry::Vacant(entry) => {
        entry.insert(GlobPath {
          pattern: pattern.to_string(),
          excludes: excludes.to_vec(),
          files: matches.files.clone(),
          deps: matches.deps,
          key,
        });
        None
      }
    };

    match raced {
      Some(existing) => {
        verify(&existing, pattern, excludes);
        debug!(key = %existing.key, "glob resolved concurrently, keeping stored result");
        Ok(existing.files)
      }
      None => Ok(matches.files),
    }
  }

  /// All cached globs, sorted by key.
  pub fn snapshot(&self) -> Vec<GlobPath> {
    let mut globs: Vec<GlobPath> = self.lock().values().cloned().collect();
    globs.sort_by(|a, b| a.key.cmp(&b.key));
    globs
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.lock().is_empty()
  }

  fn lock(&self) -> MutexGuard<'_, HashMap<String, GlobPath>> {
    self.globs.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl<P> std::fmt::Debug for GlobCache<P> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let len = self.globs.lock().unwrap_or_else(PoisonError::into_inner).len();
    f.debug_struct("GlobCache").field("globs", &len).finish()
  }
}

/// The stored entry must describe the same query as the request.
fn verify(stored: &GlobPath, pattern: &str, excludes: &[String]) {
  if stored.pattern != pattern {
    Fault::GlobPatternMismatch {
      key: stored.key.clone(),
      requested: pattern.to_string(),
      stored: stored.pattern.clone(),
    }
    .raise();
  }
  if stored.excludes != excludes {
    Fault::GlobExcludesMismatch {
      key: stored.key.clone(),
      requested: excludes.to_vec(),
      stored: stored.excludes.clone(),
    }
    .raise();
  }
}
