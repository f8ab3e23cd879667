//! Make-style dependency files.
//!
//! Downstream incremental tooling reads these to decide when the generator
//! has to run again. The format is a single rule:
//!
//! ```text
//! build.ninja: \
//!  Blueprints \
//!  src/Blueprints
//! ```

use std::fs;
use std::io;
use std::path::Path;

/// Escape a path for use as a dependency-file prerequisite.
///
/// Backslash, space, `#`, `*`, `[` and `|` are prefixed with a backslash.
pub fn escape_dep_path(path: &str) -> String {
  let mut escaped = String::with_capacity(path.len());
  for c in path.chars() {
    if matches!(c, '\\' | ' ' | '#' | '*' | '[' | '|') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}

/// Render a dependency file stating that `target` depends on `deps`.
pub fn format_dep_file<S: AsRef<str>>(target: &str, deps: &[S]) -> String {
  let escaped: Vec<String> = deps.iter().map(|d| escape_dep_path(d.as_ref())).collect();
  format!("{}: \\\n {}\n", target, escaped.join(" \\\n "))
}

/// Create (or truncate) `path` and write a dependency file into it.
pub fn write_dep_file<S: AsRef<str>>(path: &Path, target: &str, deps: &[S]) -> io::Result<()> {
  fs::write(path, format_dep_file(target, deps))
}
