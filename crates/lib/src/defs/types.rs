use std::collections::BTreeMap;

use super::handle::Pool;
use crate::template::TemplateString;

/// An evaluated rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleDef {
  pub comment: Option<String>,
  pub pool: Option<Pool>,
  /// Files the command itself depends on (compilers, scripts).
  pub command_deps: Vec<TemplateString>,
  pub command_order_only: Vec<TemplateString>,
  /// Rule-local variables: `command`, `description`, `depfile`, ...
  pub variables: BTreeMap<String, TemplateString>,
}

impl RuleDef {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_command(self, command: TemplateString) -> Self {
    self.with_variable("command", command)
  }

  pub fn with_variable(mut self, name: &str, value: TemplateString) -> Self {
    self.variables.insert(name.to_string(), value);
    self
  }

  pub fn with_pool(mut self, pool: Pool) -> Self {
    self.pool = Some(pool);
    self
  }

  pub fn with_command_deps(mut self, deps: Vec<TemplateString>) -> Self {
    self.command_deps = deps;
    self
  }

  pub fn with_command_order_only(mut self, deps: Vec<TemplateString>) -> Self {
    self.command_order_only = deps;
    self
  }

  pub fn with_comment(mut self, comment: &str) -> Self {
    self.comment = Some(comment.to_string());
    self
  }
}

/// An evaluated pool.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PoolDef {
  pub comment: Option<String>,
  pub depth: u32,
}

impl PoolDef {
  pub fn new(depth: u32) -> Self {
    Self { comment: None, depth }
  }
}
