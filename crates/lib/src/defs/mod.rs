//! Build-tool definitions: variables, rules, pools and build statements.
//!
//! Module-authoring code declares [`Variable`], [`Rule`] and [`Pool`] handles
//! and builds [`BuildDef`] statements out of them. Evaluation against the
//! [`EvalContext`] happens later, in the liveness tracker.

mod build;
mod handle;
mod types;

pub use build::BuildDef;
pub use handle::{EvalContext, EvalError, EvalResult, Evaluation, Handle, Pool, Rule, Variable};
pub use types::{PoolDef, RuleDef};
