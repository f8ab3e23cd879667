//! Helpers for slash-separated path lists.

/// Lexically clean a slash-separated path.
///
/// Repeated separators collapse, `.` components vanish, and `..` removes the
/// preceding component when there is one. An empty result becomes `.`.
pub fn clean_path(path: &str) -> String {
  let rooted = path.starts_with('/');
  let mut parts: Vec<&str> = Vec::new();

  for component in path.split('/') {
    match component {
      "" | "." => {}
      ".." => match parts.last() {
        Some(&last) if last != ".." => {
          parts.pop();
        }
        _ if rooted => {}
        _ => parts.push(".."),
      },
      other => parts.push(other),
    }
  }

  let joined = parts.join("/");
  match (rooted, joined.is_empty()) {
    (true, _) => format!("/{joined}"),
    (false, true) => ".".to_string(),
    (false, false) => joined,
  }
}

/// Join `prefix` with every path and clean the result.
pub fn prefix_paths<S: AsRef<str>>(paths: &[S], prefix: &str) -> Vec<String> {
  paths
    .iter()
    .map(|path| {
      let path = path.as_ref();
      match (prefix.is_empty(), path.is_empty()) {
        (true, true) => String::new(),
        (true, false) => clean_path(path),
        (false, true) => clean_path(prefix),
        (false, false) => clean_path(&format!("{prefix}/{path}")),
      }
    })
    .collect()
}

/// Replace everything after the last `.` with `extension`.
///
/// Paths without a `.` are returned unchanged.
pub fn replace_extension(path: &str, extension: &str) -> String {
  match path.rfind('.') {
    Some(dot) => format!("{}{}", &path[..=dot], extension),
    None => path.to_string(),
  }
}

/// Apply [`replace_extension`] to every path.
pub fn replace_extensions<S: AsRef<str>>(paths: &[S], extension: &str) -> Vec<String> {
  paths.iter().map(|p| replace_extension(p.as_ref(), extension)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clean_collapses_components() {
    assert_eq!(clean_path("a//b/./c"), "a/b/c");
    assert_eq!(clean_path("a/b/../c"), "a/c");
    assert_eq!(clean_path("../a"), "../a");
    assert_eq!(clean_path("/../a"), "/a");
    assert_eq!(clean_path(""), ".");
    assert_eq!(clean_path("/"), "/");
  }

  #[test]
  fn prefix_joins_and_cleans() {
    assert_eq!(
      prefix_paths(&["a.c", "sub/../b.c"], "out/.glob"),
      vec!["out/.glob/a.c", "out/.glob/b.c"]
    );
  }

  #[test]
  fn prefix_empty_prefix() {
    assert_eq!(prefix_paths(&["./a.c"], ""), vec!["a.c"]);
  }

  #[test]
  fn replaces_extension() {
    assert_eq!(replace_extension("src/main.c", "o"), "src/main.o");
    assert_eq!(replace_extension("Makefile", "o"), "Makefile");
    assert_eq!(replace_extensions(&["a.cc", "b.cpp"], "o"), vec!["a.o", "b.o"]);
  }
}
