//! Directories a generation run reads from and writes to.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{ENV_BUILD_DIR, ENV_NINJA_BUILD_DIR, ENV_SRC_DIR, GLOB_DIR_NAME};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse config {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
  pub src_dir: PathBuf,
  pub build_dir: PathBuf,
  /// Where the build tool runs from. Defaults to `build_dir`.
  pub ninja_build_dir: PathBuf,
}

/// On-disk form; `ninja_build_dir` is optional there.
#[derive(Deserialize)]
struct RawConfig {
  #[serde(default = "current_dir")]
  src_dir: PathBuf,
  #[serde(default = "current_dir")]
  build_dir: PathBuf,
  ninja_build_dir: Option<PathBuf>,
}

fn current_dir() -> PathBuf {
  PathBuf::from(".")
}

impl From<RawConfig> for GeneratorConfig {
  fn from(raw: RawConfig) -> Self {
    let ninja_build_dir = raw.ninja_build_dir.unwrap_or_else(|| raw.build_dir.clone());
    Self {
      src_dir: raw.src_dir,
      build_dir: raw.build_dir,
      ninja_build_dir,
    }
  }
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      src_dir: current_dir(),
      build_dir: current_dir(),
      ninja_build_dir: current_dir(),
    }
  }
}

impl GeneratorConfig {
  /// Read the directories from `BPGEN_SRC_DIR`, `BPGEN_BUILD_DIR` and
  /// `BPGEN_NINJA_BUILD_DIR`.
  pub fn from_env() -> Self {
    let src_dir = env::var(ENV_SRC_DIR).map(PathBuf::from).unwrap_or_else(|_| current_dir());
    let build_dir = env::var(ENV_BUILD_DIR).map(PathBuf::from).unwrap_or_else(|_| current_dir());
    let ninja_build_dir = env::var(ENV_NINJA_BUILD_DIR)
      .map(PathBuf::from)
      .unwrap_or_else(|_| build_dir.clone());

    let config = Self {
      src_dir,
      build_dir,
      ninja_build_dir,
    };
    debug!(?config, "config from environment");
    config
  }

  /// Load a JSON config file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let raw: RawConfig = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    let config = Self::from(raw);
    debug!(path = ?path, ?config, "loaded config");
    Ok(config)
  }

  /// Directory holding glob artifacts.
  pub fn glob_dir(&self) -> PathBuf {
    self.build_dir.join(GLOB_DIR_NAME)
  }
}
