//! Identity-keyed handles for variables, rules and pools.
//!
//! Two handles compare equal only when they were cloned from the same
//! declaration. Each handle carries a resolver that turns the evaluation
//! context into a definition, or signals that no definition is needed.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::types::{PoolDef, RuleDef};
use crate::template::TemplateString;

/// Error returned by a resolver. Module authors may return any error type.
pub type EvalError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of evaluating a handle against the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation<T> {
  /// An ordinary definition.
  Value(T),
  /// Provided by the build tool itself; nothing needs to be emitted.
  Builtin,
  /// A rule-local substitution point with no value of its own. Only
  /// meaningful for variables.
  Argument,
}

pub type EvalResult<T> = Result<Evaluation<T>, EvalError>;

/// The configuration object handed to every resolver.
///
/// Opaque to this crate; resolvers downcast it to the concrete type the
/// generator was configured with.
#[derive(Clone)]
pub struct EvalContext(Arc<dyn Any + Send + Sync>);

impl EvalContext {
  pub fn new<T: Any + Send + Sync>(config: T) -> Self {
    Self(Arc::new(config))
  }

  /// A context carrying no configuration.
  pub fn empty() -> Self {
    Self::new(())
  }

  /// Borrow the configuration as `T`, if that is what it holds.
  pub fn get<T: Any>(&self) -> Option<&T> {
    self.0.as_ref().downcast_ref::<T>()
  }
}

impl fmt::Debug for EvalContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("EvalContext { .. }")
  }
}

type Resolver<T> = dyn Fn(&EvalContext) -> EvalResult<T> + Send + Sync;

struct HandleInner<T> {
  id: u64,
  name: String,
  resolve: Box<Resolver<T>>,
}

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// A declared variable, rule or pool.
///
/// Cloning is cheap and preserves identity. Equality and hashing use the
/// identity only, never the name or the definition.
pub struct Handle<T>(Arc<HandleInner<T>>);

/// A build-tool variable whose value is a templated string.
pub type Variable = Handle<TemplateString>;
/// A build-tool rule.
pub type Rule = Handle<RuleDef>;
/// A build-tool pool.
pub type Pool = Handle<PoolDef>;

impl<T: 'static> Handle<T> {
  /// Declare a handle whose definition is computed by `resolve`.
  pub fn new<F>(name: impl Into<String>, resolve: F) -> Self
  where
    F: Fn(&EvalContext) -> EvalResult<T> + Send + Sync + 'static,
  {
    Self(Arc::new(HandleInner {
      id: NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed),
      name: name.into(),
      resolve: Box::new(resolve),
    }))
  }

  /// Declare a handle the build tool already knows about (`phony`,
  /// `console`, ...).
  pub fn builtin(name: impl Into<String>) -> Self {
    Self::new(name, |_| Ok(Evaluation::Builtin))
  }
}

impl<T: Clone + Send + Sync + 'static> Handle<T> {
  /// Declare a handle with a definition that does not depend on the context.
  pub fn fixed(name: impl Into<String>, value: T) -> Self {
    Self::new(name, move |_| Ok(Evaluation::Value(value.clone())))
  }
}

impl Handle<TemplateString> {
  /// Declare a rule argument placeholder.
  pub fn argument(name: impl Into<String>) -> Self {
    Self::new(name, |_| Ok(Evaluation::Argument))
  }
}

impl<T> Handle<T> {
  pub fn id(&self) -> u64 {
    self.0.id
  }

  pub fn name(&self) -> &str {
    &self.0.name
  }

  /// Run the resolver against `ctx`.
  pub fn evaluate(&self, ctx: &EvalContext) -> EvalResult<T> {
    (self.0.resolve)(ctx)
  }
}

impl<T> Clone for Handle<T> {
  fn clone(&self) -> Self {
    Self(Arc::clone(&self.0))
  }
}

impl<T> PartialEq for Handle<T> {
  fn eq(&self, other: &Self) -> bool {
    self.0.id == other.0.id
  }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.0.id.hash(state);
  }
}

impl<T> fmt::Debug for Handle<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Handle({:?}#{})", self.0.name, self.0.id)
  }
}

impl<T> fmt::Display for Handle<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0.name)
  }
}
