//! Shared helpers for generation tests.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use bpgen_lib::defs::{EvalContext, Evaluation, Variable};
use bpgen_lib::glob::{GlobMatches, GlobProvider};
use bpgen_lib::template::TemplateString;

/// The configuration resolvers see through the evaluation context.
#[derive(Debug, Clone)]
pub struct Toolchain {
  pub cc: String,
  pub cflags: String,
}

pub fn toolchain_ctx(cc: &str) -> EvalContext {
  EvalContext::new(Toolchain {
    cc: cc.to_string(),
    cflags: "-O2".to_string(),
  })
}

/// A variable whose value is read from [`Toolchain`].
pub fn toolchain_variable(name: &str, read: fn(&Toolchain) -> &str) -> Variable {
  Variable::new(name, move |ctx| {
    let toolchain = ctx.get::<Toolchain>().ok_or("context carries no toolchain")?;
    Ok(Evaluation::Value(TemplateString::literal(read(toolchain))))
  })
}

/// An in-memory source tree: patterns map to their matches.
#[derive(Default)]
pub struct FakeTree {
  globs: HashMap<String, GlobMatches>,
  calls: AtomicUsize,
}

impl FakeTree {
  pub fn with_glob(mut self, pattern: &str, files: &[&str], dirs: &[&str]) -> Self {
    self.globs.insert(
      pattern.to_string(),
      GlobMatches {
        files: files.iter().map(|s| s.to_string()).collect(),
        deps: dirs.iter().map(|s| s.to_string()).collect(),
      },
    );
    self
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

impl GlobProvider for FakeTree {
  fn glob(&self, pattern: &str, excludes: &[String]) -> io::Result<GlobMatches> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    let mut matches = self
      .globs
      .get(pattern)
      .cloned()
      .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no directory for {pattern}")))?;
    matches.files.retain(|f| !excludes.contains(f));
    Ok(matches)
  }
}
