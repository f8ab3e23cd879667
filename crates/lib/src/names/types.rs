use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A location in a build description file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
  pub file: String,
  pub line: u32,
  pub column: u32,
}

impl Pos {
  pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
    Self {
      file: file.into(),
      line,
      column,
    }
  }
}

impl fmt::Display for Pos {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}:{}", self.file, self.line, self.column)
  }
}

struct GroupInner {
  id: u64,
  name: RwLock<String>,
  positions: Vec<Pos>,
}

static NEXT_GROUP_ID: AtomicU64 = AtomicU64::new(1);

/// Entities declared under one name, such as the variants of a module.
///
/// Clones share the group: a rename through the registry is visible to every
/// holder. Equality is identity.
#[derive(Clone)]
pub struct ModuleGroup(Arc<GroupInner>);

impl ModuleGroup {
  /// A group with a single declaration at `pos`.
  pub fn new(name: impl Into<String>, pos: Pos) -> Self {
    Self::with_positions(name, pos, Vec::new())
  }

  /// A group whose first declaration is at `first`, followed by `rest`.
  pub fn with_positions(name: impl Into<String>, first: Pos, rest: Vec<Pos>) -> Self {
    let mut positions = Vec::with_capacity(rest.len() + 1);
    positions.push(first);
    positions.extend(rest);
    Self(Arc::new(GroupInner {
      id: NEXT_GROUP_ID.fetch_add(1, Ordering::Relaxed),
      name: RwLock::new(name.into()),
      positions,
    }))
  }

  pub fn id(&self) -> u64 {
    self.0.id
  }

  pub fn name(&self) -> String {
    self.0.name.read().unwrap_or_else(PoisonError::into_inner).clone()
  }

  pub(crate) fn set_name(&self, name: &str) {
    *self.0.name.write().unwrap_or_else(PoisonError::into_inner) = name.to_string();
  }

  /// Where the group was first declared. Diagnostics point here.
  pub fn pos(&self) -> &Pos {
    &self.0.positions[0]
  }

  pub fn positions(&self) -> &[Pos] {
    &self.0.positions
  }
}

impl PartialEq for ModuleGroup {
  fn eq(&self, other: &Self) -> bool {
    self.0.id == other.0.id
  }
}

impl Eq for ModuleGroup {}

impl fmt::Debug for ModuleGroup {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ModuleGroup({:?}#{})", self.name(), self.0.id)
  }
}

impl fmt::Display for ModuleGroup {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name())
  }
}

/// A scope in which group names must be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Namespace {
  path: String,
}

impl Namespace {
  /// The single namespace of a flat registry.
  pub fn root() -> Self {
    Self::default()
  }

  pub fn new(path: impl Into<String>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &str {
    &self.path
  }

  pub fn is_root(&self) -> bool {
    self.path.is_empty()
  }
}

/// What a registry may inspect when picking a namespace for a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceContext {
  module_path: String,
}

impl NamespaceContext {
  /// Context for a declaration in the build description file `module_path`.
  pub fn new(module_path: impl Into<String>) -> Self {
    Self {
      module_path: module_path.into(),
    }
  }

  pub fn module_path(&self) -> &str {
    &self.module_path
  }
}

/// User-facing naming diagnostics.
///
/// Continuation lines are indented by seven spaces so they line up under
/// the message once the driver prefixes it with `error: `.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
  /// `pos` is the rejected declaration; the driver reports the error there.
  #[error("module {name:?} already defined\n       {previous} <-- previous definition here")]
  AlreadyDefined { name: String, pos: Pos, previous: Pos },

  #[error("renaming module {old:?} to {new:?} conflicts with existing module\n       {existing} <-- existing module defined here")]
  RenameConflict { old: String, new: String, existing: Pos },

  #[error("cannot rename undefined module {0:?}")]
  UndefinedModule(String),

  #[error("{depender:?} depends on undefined module {dependency:?}")]
  MissingDependency { depender: String, dependency: String },
}
