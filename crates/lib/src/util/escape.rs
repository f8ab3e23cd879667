//! Escaping for strings embedded in build-tool files and shell commands.

/// Escape `$` for the build tool by doubling it.
pub fn ninja_escape_str(s: &str) -> String {
  s.replace('$', "$$")
}

/// Escape every string in `slice` for the build tool. Returns a new vector.
///
/// Output, input and dependency paths are escaped when the statement is
/// written; this is for values coming from module properties that are passed
/// as rule arguments.
pub fn ninja_escape<S: AsRef<str>>(slice: &[S]) -> Vec<String> {
  slice.iter().map(|s| ninja_escape_str(s.as_ref())).collect()
}

fn shell_unsafe_char(c: char) -> bool {
  !(c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '=' | '.' | ',' | '/' | ' '))
}

/// Quote a string for the shell if it contains anything outside the safe set.
///
/// Unsafe strings are wrapped in single quotes, and embedded single quotes
/// become `'\''`.
pub fn shell_escape_str(s: &str) -> String {
  if !s.chars().any(shell_unsafe_char) {
    return s.to_string();
  }
  format!("'{}'", s.replace('\'', r"'\''"))
}

/// Shell-escape every string in `slice`. Returns a new vector.
pub fn shell_escape<S: AsRef<str>>(slice: &[S]) -> Vec<String> {
  slice.iter().map(|s| shell_escape_str(s.as_ref())).collect()
}

/// Escape for the build tool first, then for the shell.
pub fn ninja_and_shell_escape<S: AsRef<str>>(slice: &[S]) -> Vec<String> {
  shell_escape(&ninja_escape(slice))
}
