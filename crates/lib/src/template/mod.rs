//! Templated strings: literal text interleaved with variable references.
//!
//! Strings in the generated build file may reference variables, which the
//! build tool expands when it runs. Keeping the references as [`Variable`]
//! handles (rather than plain text) lets the liveness tracker discover which
//! variable definitions have to be emitted.
//!
//! # Syntax
//!
//! - `$name` or `${name}` - a variable reference
//! - `$$` - a literal `$`
//! - `$ ` and `$:` - a literal space or colon
//! - `$` followed by a newline - line continuation; leading whitespace on
//!   the next line is dropped
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use bpgen_lib::defs::Variable;
//! use bpgen_lib::template::{parse, TemplateString};
//!
//! let cc = Variable::fixed("cc", TemplateString::literal("clang"));
//! let scope = HashMap::from([("cc".to_string(), cc.clone())]);
//!
//! let command = parse("${cc} -c $in -o $$out", &scope);
//! assert!(command.is_err()); // `in` is not declared in this scope
//!
//! let command = parse("${cc} -c main.c", &scope).unwrap();
//! assert_eq!(command.variables().collect::<Vec<_>>(), vec![&cc]);
//! assert_eq!(command.render(), "${cc} -c main.c");
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::defs::Variable;
use crate::util::escape::ninja_escape_str;

/// A segment of a templated string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  Literal(String),
  Variable(Variable),
}

/// Text with embedded variable references.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateString {
  segments: Vec<Segment>,
}

impl TemplateString {
  pub fn new() -> Self {
    Self::default()
  }

  /// A string with no variable references.
  pub fn literal(text: impl Into<String>) -> Self {
    let mut s = Self::new();
    s.push_literal(&text.into());
    s
  }

  /// A string consisting of a single variable reference.
  pub fn variable(variable: &Variable) -> Self {
    Self::new().with_variable(variable)
  }

  /// Append literal text, merging with a trailing literal segment.
  pub fn push_literal(&mut self, text: &str) {
    if text.is_empty() {
      return;
    }
    match self.segments.last_mut() {
      Some(Segment::Literal(last)) => last.push_str(text),
      _ => self.segments.push(Segment::Literal(text.to_string())),
    }
  }

  pub fn push_variable(&mut self, variable: &Variable) {
    self.segments.push(Segment::Variable(variable.clone()));
  }

  pub fn with_literal(mut self, text: &str) -> Self {
    self.push_literal(text);
    self
  }

  pub fn with_variable(mut self, variable: &Variable) -> Self {
    self.push_variable(variable);
    self
  }

  pub fn segments(&self) -> &[Segment] {
    &self.segments
  }

  pub fn is_empty(&self) -> bool {
    self.segments.is_empty()
  }

  /// Variables referenced by this string, in order of appearance.
  pub fn variables(&self) -> impl Iterator<Item = &Variable> {
    self.segments.iter().filter_map(|segment| match segment {
      Segment::Variable(v) => Some(v),
      Segment::Literal(_) => None,
    })
  }

  /// Render as build-file text. Literal `$` is doubled, newlines become line
  /// continuations, and references are written as `${name}`.
  pub fn render(&self) -> String {
    let mut out = String::new();
    for segment in &self.segments {
      match segment {
        Segment::Literal(text) => out.push_str(&ninja_escape_str(text).replace('\n', "$\n")),
        Segment::Variable(v) => {
          out.push_str("${");
          out.push_str(v.name());
          out.push('}');
        }
      }
    }
    out
  }
}

impl From<&str> for TemplateString {
  fn from(text: &str) -> Self {
    Self::literal(text)
  }
}

impl From<String> for TemplateString {
  fn from(text: String) -> Self {
    Self::literal(text)
  }
}

/// Errors that can occur while parsing a templated string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
  #[error("unclosed variable reference at position {0}")]
  Unclosed(usize),

  #[error("empty variable name at position {0}")]
  EmptyName(usize),

  #[error("invalid character {ch:?} in variable name at position {pos}")]
  InvalidName { pos: usize, ch: char },

  #[error("invalid $ escape {ch:?} at position {pos}")]
  InvalidEscape { pos: usize, ch: char },

  #[error("unexpected end of string after $")]
  TrailingDollar,

  #[error("undefined variable {0:?}")]
  UndefinedVariable(String),
}

/// Looks up variables by name while parsing.
pub trait Scope {
  fn lookup_variable(&self, name: &str) -> Option<Variable>;
}

impl Scope for HashMap<String, Variable> {
  fn lookup_variable(&self, name: &str) -> Option<Variable> {
    self.get(name).cloned()
  }
}

fn is_simple_name_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_braced_name_char(c: char) -> bool {
  is_simple_name_char(c) || c == '.'
}

/// Parse build-file string syntax, resolving references through `scope`.
///
/// # Errors
///
/// Returns an error for malformed `$` sequences and for names `scope` does
/// not know.
pub fn parse(input: &str, scope: &impl Scope) -> Result<TemplateString, TemplateError> {
  let mut result = TemplateString::new();
  let mut literal = String::new();
  let mut chars = input.char_indices().peekable();

  while let Some((pos, ch)) = chars.next() {
    if ch != '$' {
      literal.push(ch);
      continue;
    }

    match chars.next() {
      None => return Err(TemplateError::TrailingDollar),
      Some((_, c @ ('$' | ' ' | ':'))) => literal.push(c),
      Some((_, '\n')) => {
        while chars.next_if(|&(_, c)| c == ' ' || c == '\t').is_some() {}
      }
      Some((brace_pos, '{')) => {
        let mut name = String::new();
        let mut closed = false;

        for (p, c) in chars.by_ref() {
          if c == '}' {
            closed = true;
            break;
          }
          if !is_braced_name_char(c) {
            return Err(TemplateError::InvalidName { pos: p, ch: c });
          }
          name.push(c);
        }

        if !closed {
          return Err(TemplateError::Unclosed(pos));
        }
        if name.is_empty() {
          return Err(TemplateError::EmptyName(brace_pos));
        }

        result.push_literal(&std::mem::take(&mut literal));
        result.push_variable(&lookup(scope, &name)?);
      }
      Some((_, c)) if is_simple_name_char(c) => {
        let mut name = String::from(c);
        while let Some((_, c)) = chars.next_if(|&(_, c)| is_simple_name_char(c)) {
          name.push(c);
        }

        result.push_literal(&std::mem::take(&mut literal));
        result.push_variable(&lookup(scope, &name)?);
      }
      Some((p, c)) => return Err(TemplateError::InvalidEscape { pos: p, ch: c }),
    }
  }

  result.push_literal(&literal);
  Ok(result)
}

/// Parse every string in `inputs`.
pub fn parse_list<S: AsRef<str>>(inputs: &[S], scope: &impl Scope) -> Result<Vec<TemplateString>, TemplateError> {
  inputs.iter().map(|s| parse(s.as_ref(), scope)).collect()
}

fn lookup(scope: &impl Scope, name: &str) -> Result<Variable, TemplateError> {
  scope
    .lookup_variable(name)
    .ok_or_else(|| TemplateError::UndefinedVariable(name.to_string()))
}
