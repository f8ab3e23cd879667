//! Liveness tracking for build-tool definitions.
//!
//! Only variables, rules and pools that some emitted build statement reaches
//! are written to the build file. The tracker is fed every statement that
//! will be emitted and computes the transitive closure of what they
//! reference, evaluating each definition exactly once per generation run.
//!
//! Reachability follows:
//! - statement -> its rule
//! - rule -> its pool, command deps, command order-only deps, local variables
//! - any templated string -> every variable embedded in it
//! - variable -> every variable embedded in its value
//!
//! Built-in rules, pools and variables, and argument placeholders, are
//! resolved but never recorded as live.

mod types;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::defs::{BuildDef, EvalContext, Evaluation, Pool, PoolDef, Rule, RuleDef, Variable};
use crate::template::TemplateString;

pub use types::{DefKind, LiveError, LiveSet};

/// Collects the live definitions of one generation run.
///
/// Safe to share between threads; each call to
/// [`add_build_def_deps`](Self::add_build_def_deps) holds the tracker's lock
/// for its whole expansion.
#[derive(Debug)]
pub struct LiveTracker {
  ctx: EvalContext,
  state: Mutex<LiveState>,
}

#[derive(Debug, Default)]
struct LiveState {
  variables: HashMap<Variable, TemplateString>,
  rules: HashMap<Rule, Arc<RuleDef>>,
  pools: HashMap<Pool, PoolDef>,
  /// Ids of handles that resolved to a built-in or an argument placeholder.
  unrecorded: HashSet<u64>,
}

impl LiveTracker {
  pub fn new(ctx: EvalContext) -> Self {
    Self {
      ctx,
      state: Mutex::new(LiveState::default()),
    }
  }

  /// Mark everything `def` transitively references as live.
  ///
  /// Stores the evaluated rule definition in `def.rule_def` (`None` for a
  /// built-in rule). Definitions already live are not evaluated again.
  ///
  /// # Errors
  ///
  /// Returns the first evaluation failure. Definitions resolved before the
  /// failure stay live.
  pub fn add_build_def_deps(&self, def: &mut BuildDef) -> Result<(), LiveError> {
    let mut state = self.lock();

    def.rule_def = state.add_rule(&self.ctx, &def.rule)?;

    for s in def.template_strings() {
      state.add_template_deps(&self.ctx, s)?;
    }

    Ok(())
  }

  /// Remove `variable` from the live set. Returns whether it was live.
  pub fn remove_variable_if_live(&self, variable: &Variable) -> bool {
    self.lock().variables.remove(variable).is_some()
  }

  /// Remove `rule` from the live set. Returns whether it was live.
  pub fn remove_rule_if_live(&self, rule: &Rule) -> bool {
    self.lock().rules.remove(rule).is_some()
  }

  pub fn is_variable_live(&self, variable: &Variable) -> bool {
    self.lock().variables.contains_key(variable)
  }

  pub fn is_rule_live(&self, rule: &Rule) -> bool {
    self.lock().rules.contains_key(rule)
  }

  pub fn is_pool_live(&self, pool: &Pool) -> bool {
    self.lock().pools.contains_key(pool)
  }

  /// Hand the collected definitions to the writer.
  pub fn into_live_set(self) -> LiveSet {
    let state = self.state.into_inner().unwrap_or_else(PoisonError::into_inner);
    debug!(
      variables = state.variables.len(),
      rules = state.rules.len(),
      pools = state.pools.len(),
      "liveness tracking complete"
    );
    LiveSet {
      variables: state.variables,
      rules: state.rules,
      pools: state.pools,
    }
  }

  fn lock(&self) -> MutexGuard<'_, LiveState> {
    // Every mutation leaves the maps consistent, so a poisoned lock is usable.
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl LiveState {
  fn add_rule(&mut self, ctx: &EvalContext, rule: &Rule) -> Result<Option<Arc<RuleDef>>, LiveError> {
    if let Some(def) = self.rules.get(rule) {
      return Ok(Some(Arc::clone(def)));
    }
    if self.unrecorded.contains(&rule.id()) {
      return Ok(None);
    }

    let evaluation = rule.evaluate(ctx).map_err(|source| LiveError::Evaluation {
      kind: DefKind::Rule,
      name: rule.name().to_string(),
      source,
    })?;

    let def = match evaluation {
      Evaluation::Value(def) => def,
      Evaluation::Builtin => {
        trace!(rule = %rule, "built-in rule");
        self.unrecorded.insert(rule.id());
        return Ok(None);
      }
      Evaluation::Argument => {
        return Err(LiveError::UnexpectedArgument {
          kind: DefKind::Rule,
          name: rule.name().to_string(),
        });
      }
    };

    if let Some(pool) = &def.pool {
      self.add_pool(ctx, pool)?;
    }

    for s in def
      .command_deps
      .iter()
      .chain(&def.command_order_only)
      .chain(def.variables.values())
    {
      self.add_template_deps(ctx, s)?;
    }

    let def = Arc::new(def);
    self.rules.insert(rule.clone(), Arc::clone(&def));
    debug!(rule = %rule, "rule is live");

    Ok(Some(def))
  }

  fn add_pool(&mut self, ctx: &EvalContext, pool: &Pool) -> Result<(), LiveError> {
    if self.pools.contains_key(pool) || self.unrecorded.contains(&pool.id()) {
      return Ok(());
    }

    let evaluation = pool.evaluate(ctx).map_err(|source| LiveError::Evaluation {
      kind: DefKind::Pool,
      name: pool.name().to_string(),
      source,
    })?;

    match evaluation {
      Evaluation::Value(def) => {
        self.pools.insert(pool.clone(), def);
        debug!(pool = %pool, "pool is live");
      }
      Evaluation::Builtin => {
        trace!(pool = %pool, "built-in pool");
        self.unrecorded.insert(pool.id());
      }
      Evaluation::Argument => {
        return Err(LiveError::UnexpectedArgument {
          kind: DefKind::Pool,
          name: pool.name().to_string(),
        });
      }
    }

    Ok(())
  }

  fn add_variable(&mut self, ctx: &EvalContext, variable: &Variable) -> Result<(), LiveError> {
    if self.variables.contains_key(variable) || self.unrecorded.contains(&variable.id()) {
      return Ok(());
    }

    let evaluation = variable.evaluate(ctx).map_err(|source| LiveError::Evaluation {
      kind: DefKind::Variable,
      name: variable.name().to_string(),
      source,
    })?;

    match evaluation {
      Evaluation::Value(value) => {
        // Recorded before expanding so that reference cycles terminate.
        self.variables.insert(variable.clone(), value.clone());
        debug!(variable = %variable, "variable is live");
        self.add_template_deps(ctx, &value)
      }
      Evaluation::Argument | Evaluation::Builtin => {
        trace!(variable = %variable, "variable has no definition to emit");
        self.unrecorded.insert(variable.id());
        Ok(())
      }
    }
  }

  fn add_template_deps(&mut self, ctx: &EvalContext, s: &TemplateString) -> Result<(), LiveError> {
    for variable in s.variables() {
      self.add_variable(ctx, variable)?;
    }
    Ok(())
  }
}
