//! Name registry for module groups.
//!
//! Maps declared names to their groups for the whole module-graph
//! construction phase. Entries are never removed, only renamed.

mod types;

use std::collections::HashMap;

use tracing::debug;

use crate::fault::Fault;

pub use types::{ModuleGroup, NameError, Namespace, NamespaceContext, Pos};

/// How the generator locates module groups by name.
///
/// Implementations may partition names into namespaces; within one namespace
/// names are unique at all times.
pub trait NameInterface {
  /// Register `group` under its current name. Returns the namespace it was
  /// placed in.
  fn new_module(&mut self, ctx: &NamespaceContext, group: ModuleGroup) -> Result<Namespace, NameError>;

  fn module_from_name(&self, name: &str, namespace: &Namespace) -> Option<ModuleGroup>;

  /// Diagnostic for `depender` referring to a name that does not resolve.
  fn missing_dependency_error(&self, depender: &str, depender_namespace: &Namespace, dependency: &str) -> NameError;

  fn rename(&mut self, old: &str, new: &str, namespace: &Namespace) -> Result<(), NameError>;

  /// Every registered group in a deterministic order.
  fn all_modules(&self) -> Vec<ModuleGroup>;

  fn get_namespace(&self, ctx: &NamespaceContext) -> Namespace;

  /// A deterministic name for `name` that is unique across namespaces.
  fn unique_name(&self, ctx: &NamespaceContext, name: &str) -> String;
}

/// A registry with a single namespace: one flat map keyed by name.
#[derive(Debug, Default)]
pub struct SimpleNameInterface {
  modules: HashMap<String, ModuleGroup>,
}

impl SimpleNameInterface {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }
}

impl NameInterface for SimpleNameInterface {
  fn new_module(&mut self, _ctx: &NamespaceContext, group: ModuleGroup) -> Result<Namespace, NameError> {
    let name = group.name();
    if let Some(existing) = self.modules.get(&name) {
      return Err(NameError::AlreadyDefined {
        name,
        pos: group.pos().clone(),
        previous: existing.pos().clone(),
      });
    }

    debug!(module = %name, pos = %group.pos(), "registered module");
    self.modules.insert(name, group);
    Ok(Namespace::root())
  }

  fn module_from_name(&self, name: &str, _namespace: &Namespace) -> Option<ModuleGroup> {
    self.modules.get(name).cloned()
  }

  fn missing_dependency_error(&self, depender: &str, _depender_namespace: &Namespace, dependency: &str) -> NameError {
    NameError::MissingDependency {
      depender: depender.to_string(),
      dependency: dependency.to_string(),
    }
  }

  fn rename(&mut self, old: &str, new: &str, _namespace: &Namespace) -> Result<(), NameError> {
    if let Some(existing) = self.modules.get(new) {
      return Err(NameError::RenameConflict {
        old: old.to_string(),
        new: new.to_string(),
        existing: existing.pos().clone(),
      });
    }

    let group = self
      .modules
      .remove(old)
      .ok_or_else(|| NameError::UndefinedModule(old.to_string()))?;
    group.set_name(new);
    self.modules.insert(new.to_string(), group);
    debug!(old = %old, new = %new, "renamed module");
    Ok(())
  }

  /// Groups sorted by name. Two groups sharing a name is a [`Fault`].
  fn all_modules(&self) -> Vec<ModuleGroup> {
    let mut groups: Vec<(String, ModuleGroup)> = self.modules.values().map(|g| (g.name(), g.clone())).collect();
    groups.sort_by(|a, b| a.0.cmp(&b.0));

    if let Some(pair) = groups.windows(2).find(|w| w[0].0 == w[1].0) {
      Fault::DuplicateGroupName(pair[0].0.clone()).raise();
    }

    groups.into_iter().map(|(_, group)| group).collect()
  }

  fn get_namespace(&self, _ctx: &NamespaceContext) -> Namespace {
    Namespace::root()
  }

  fn unique_name(&self, _ctx: &NamespaceContext, name: &str) -> String {
    name.to_string()
  }
}
