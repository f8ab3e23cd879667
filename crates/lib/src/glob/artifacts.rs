//! On-disk records of glob results.
//!
//! Each cached glob gets a `<key>.glob` file listing its matches, plus a
//! `<key>.glob.d` dependency file naming the directories that were scanned.
//! A downstream build re-runs generation when a scanned directory changes
//! and the rewritten glob file differs from the old one.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};

use super::GlobPath;
use crate::util::depfile::write_dep_file;

#[derive(Debug, Error)]
pub enum ArtifactError {
  #[error("failed to create directory {path}: {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Where the marker file for `glob` lives under `glob_dir`.
pub fn glob_file_path(glob_dir: &Path, glob: &GlobPath) -> PathBuf {
  glob_dir.join(glob.file_name())
}

fn dep_file_path(glob_file: &Path) -> PathBuf {
  let mut name = OsString::from(glob_file.as_os_str());
  name.push(".d");
  PathBuf::from(name)
}

/// Write `files` one per line to `path`, leaving the file untouched when it
/// already holds exactly that list. Returns whether anything was written.
pub fn write_glob_file(path: &Path, files: &[String]) -> Result<bool, ArtifactError> {
  let contents: String = files.iter().map(|f| format!("{f}\n")).collect();

  match fs::read(path) {
    Ok(existing) if existing == contents.as_bytes() => {
      trace!(path = ?path, "glob file unchanged");
      return Ok(false);
    }
    Ok(_) => {}
    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
    Err(source) => {
      return Err(ArtifactError::Read {
        path: path.to_path_buf(),
        source,
      });
    }
  }

  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).map_err(|source| ArtifactError::CreateDir {
      path: parent.to_path_buf(),
      source,
    })?;
  }
  fs::write(path, contents).map_err(|source| ArtifactError::Write {
    path: path.to_path_buf(),
    source,
  })?;
  debug!(path = ?path, files = files.len(), "wrote glob file");
  Ok(true)
}

/// Write the glob file and dependency file for every glob.
///
/// Returns the glob file paths in input order; the caller lists them as
/// inputs of the generated build file's own dependency file.
pub fn write_glob_artifacts(glob_dir: &Path, globs: &[GlobPath]) -> Result<Vec<PathBuf>, ArtifactError> {
  fs::create_dir_all(glob_dir).map_err(|source| ArtifactError::CreateDir {
    path: glob_dir.to_path_buf(),
    source,
  })?;

  let mut written = Vec::with_capacity(globs.len());
  for glob in globs {
    let path = glob_file_path(glob_dir, glob);
    write_glob_file(&path, &glob.files)?;

    let dep_path = dep_file_path(&path);
    write_dep_file(&dep_path, &path.to_string_lossy(), &glob.deps).map_err(|source| ArtifactError::Write {
      path: dep_path.clone(),
      source,
    })?;

    written.push(path);
  }

  debug!(dir = ?glob_dir, globs = written.len(), "wrote glob artifacts");
  Ok(written)
}
