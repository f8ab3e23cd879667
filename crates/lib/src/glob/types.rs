use std::io;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::GLOB_FILE_SUFFIX;

/// A resolved glob as stored in the cache. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobPath {
  pub pattern: String,
  pub excludes: Vec<String>,
  /// Matched paths.
  pub files: Vec<String>,
  /// Directories scanned while matching. If any of them change, the
  /// generation run that used this glob may be stale.
  pub deps: Vec<String>,
  /// Cache key derived from `pattern` and `excludes`.
  pub key: String,
}

impl GlobPath {
  /// Name of the marker file recording this glob's result.
  pub fn file_name(&self) -> String {
    format!("{}{}", self.key, GLOB_FILE_SUFFIX)
  }
}

/// What a provider returns for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobMatches {
  pub files: Vec<String>,
  pub deps: Vec<String>,
}

/// The filesystem scanner behind the cache.
pub trait GlobProvider: Send + Sync {
  fn glob(&self, pattern: &str, excludes: &[String]) -> io::Result<GlobMatches>;
}

impl<P: GlobProvider + ?Sized> GlobProvider for Arc<P> {
  fn glob(&self, pattern: &str, excludes: &[String]) -> io::Result<GlobMatches> {
    (**self).glob(pattern, excludes)
  }
}

#[derive(Debug, Error)]
pub enum GlobError {
  #[error("failed to glob {pattern:?}: {source}")]
  Provider {
    pattern: String,
    #[source]
    source: io::Error,
  },
}
