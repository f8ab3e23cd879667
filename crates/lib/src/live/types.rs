//! Result and error types for liveness tracking.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::defs::{EvalError, Handle, Pool, PoolDef, Rule, RuleDef, Variable};
use crate::template::TemplateString;

/// Which kind of definition an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefKind {
  Variable,
  Rule,
  Pool,
}

impl fmt::Display for DefKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DefKind::Variable => f.write_str("variable"),
      DefKind::Rule => f.write_str("rule"),
      DefKind::Pool => f.write_str("pool"),
    }
  }
}

/// Errors that abort [`LiveTracker::add_build_def_deps`](super::LiveTracker::add_build_def_deps).
#[derive(Debug, Error)]
pub enum LiveError {
  /// A resolver returned an error.
  #[error("error evaluating {kind} {name:?}: {source}")]
  Evaluation {
    kind: DefKind,
    name: String,
    #[source]
    source: EvalError,
  },

  /// A rule or pool resolver claimed to be an argument placeholder.
  #[error("{kind} {name:?} resolved to an argument placeholder; only variables can be arguments")]
  UnexpectedArgument { kind: DefKind, name: String },
}

/// The evaluated definitions that must be written to the build file.
#[derive(Debug, Default)]
pub struct LiveSet {
  pub variables: HashMap<Variable, TemplateString>,
  pub rules: HashMap<Rule, Arc<RuleDef>>,
  pub pools: HashMap<Pool, PoolDef>,
}

impl LiveSet {
  pub fn is_empty(&self) -> bool {
    self.variables.is_empty() && self.rules.is_empty() && self.pools.is_empty()
  }

  /// Live variables ordered by name, then declaration order.
  pub fn sorted_variables(&self) -> Vec<(&Variable, &TemplateString)> {
    sorted(&self.variables)
  }

  /// Live rules ordered by name, then declaration order.
  pub fn sorted_rules(&self) -> Vec<(&Rule, &Arc<RuleDef>)> {
    sorted(&self.rules)
  }

  /// Live pools ordered by name, then declaration order.
  pub fn sorted_pools(&self) -> Vec<(&Pool, &PoolDef)> {
    sorted(&self.pools)
  }
}

fn sorted<T, V>(map: &HashMap<Handle<T>, V>) -> Vec<(&Handle<T>, &V)> {
  let mut entries: Vec<_> = map.iter().collect();
  entries.sort_by(|(a, _), (b, _)| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
  entries
}
