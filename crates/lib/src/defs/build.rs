//! Build statements.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::handle::Rule;
use super::types::RuleDef;
use crate::template::TemplateString;

/// One invocation of a rule producing specific outputs.
#[derive(Debug, Clone)]
pub struct BuildDef {
  pub comment: Option<String>,
  pub rule: Rule,
  /// Filled in by the liveness tracker. `None` for built-in rules.
  pub rule_def: Option<Arc<RuleDef>>,
  pub outputs: Vec<TemplateString>,
  pub implicit_outputs: Vec<TemplateString>,
  pub inputs: Vec<TemplateString>,
  pub implicits: Vec<TemplateString>,
  pub order_only: Vec<TemplateString>,
  /// Per-statement variable overrides.
  pub variables: BTreeMap<String, TemplateString>,
  /// Values for the rule's argument placeholders.
  pub args: BTreeMap<String, TemplateString>,
  pub optional: bool,
}

impl BuildDef {
  pub fn new(rule: Rule) -> Self {
    Self {
      comment: None,
      rule,
      rule_def: None,
      outputs: Vec::new(),
      implicit_outputs: Vec::new(),
      inputs: Vec::new(),
      implicits: Vec::new(),
      order_only: Vec::new(),
      variables: BTreeMap::new(),
      args: BTreeMap::new(),
      optional: false,
    }
  }

  pub fn with_outputs(mut self, outputs: Vec<TemplateString>) -> Self {
    self.outputs = outputs;
    self
  }

  pub fn with_implicit_outputs(mut self, outputs: Vec<TemplateString>) -> Self {
    self.implicit_outputs = outputs;
    self
  }

  pub fn with_inputs(mut self, inputs: Vec<TemplateString>) -> Self {
    self.inputs = inputs;
    self
  }

  pub fn with_implicits(mut self, implicits: Vec<TemplateString>) -> Self {
    self.implicits = implicits;
    self
  }

  pub fn with_order_only(mut self, order_only: Vec<TemplateString>) -> Self {
    self.order_only = order_only;
    self
  }

  pub fn with_variable(mut self, name: &str, value: TemplateString) -> Self {
    self.variables.insert(name.to_string(), value);
    self
  }

  pub fn with_arg(mut self, name: &str, value: TemplateString) -> Self {
    self.args.insert(name.to_string(), value);
    self
  }

  pub fn with_comment(mut self, comment: &str) -> Self {
    self.comment = Some(comment.to_string());
    self
  }

  pub fn optional(mut self) -> Self {
    self.optional = true;
    self
  }

  /// Every templated string carried by the statement itself, in emission
  /// order: outputs, implicit outputs, inputs, implicits, order-only,
  /// variable overrides, then rule arguments.
  pub fn template_strings(&self) -> impl Iterator<Item = &TemplateString> {
    self
      .outputs
      .iter()
      .chain(&self.implicit_outputs)
      .chain(&self.inputs)
      .chain(&self.implicits)
      .chain(&self.order_only)
      .chain(self.variables.values())
      .chain(self.args.values())
  }
}
