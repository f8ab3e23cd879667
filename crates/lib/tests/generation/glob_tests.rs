//! Glob cache behavior and the artifacts written from its snapshot.

use std::fs;

use bpgen_lib::config::GeneratorConfig;
use bpgen_lib::fault::{Fault, catch_fault};
use bpgen_lib::glob::artifacts::write_glob_artifacts;
use bpgen_lib::glob::{GlobCache, GlobError};
use tempfile::tempdir;

use super::common::FakeTree;

fn tree() -> FakeTree {
  FakeTree::default()
    .with_glob("src/*.c", &["src/a.c", "src/b.c", "src/test.c"], &["src"])
    .with_glob("include/**/*.h", &["include/x/y.h"], &["include", "include/x"])
    .with_glob("src/?.c", &["src/a.c", "src/b.c"], &["src"])
}

#[test]
fn excludes_filter_and_key_the_result() {
  let cache = GlobCache::new(tree());

  let all = cache.resolve("src/*.c", &[]).unwrap();
  let no_tests = cache.resolve("src/*.c", &["src/test.c".to_string()]).unwrap();

  assert_eq!(all.len(), 3);
  assert_eq!(no_tests, vec!["src/a.c", "src/b.c"]);
  assert_eq!(cache.len(), 2);
}

#[test]
fn concurrent_generation_scans_each_query_about_once() {
  let cache = GlobCache::new(tree());

  std::thread::scope(|s| {
    for _ in 0..4 {
      s.spawn(|| {
        for _ in 0..50 {
          assert_eq!(cache.resolve("include/**/*.h", &[]).unwrap(), vec!["include/x/y.h"]);
        }
      });
    }
  });

  let snapshot = cache.snapshot();
  assert_eq!(snapshot.len(), 1);
  assert_eq!(snapshot[0].deps, vec!["include", "include/x"]);
}

#[test]
fn unknown_directory_propagates_provider_error() {
  let cache = GlobCache::new(tree());

  let err = cache.resolve("gone/*.c", &[]).unwrap_err();

  let GlobError::Provider { pattern, source } = err;
  assert_eq!(pattern, "gone/*.c");
  assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn colliding_patterns_fault() {
  let cache = GlobCache::new(tree());
  cache.resolve("src/*.c", &[]).unwrap();

  let fault = catch_fault(|| cache.resolve("src/?.c", &[])).unwrap_err();

  assert!(matches!(fault, Fault::GlobPatternMismatch { ref requested, .. } if requested == "src/?.c"));
}

#[test]
fn snapshot_artifacts_land_in_glob_dir() {
  let temp = tempdir().unwrap();
  let config = GeneratorConfig {
    src_dir: temp.path().join("src"),
    build_dir: temp.path().join("out"),
    ninja_build_dir: temp.path().join("out"),
  };
  let cache = GlobCache::new(tree());
  cache.resolve("src/*.c", &["src/test.c".to_string()]).unwrap();
  cache.resolve("include/**/*.h", &[]).unwrap();

  let paths = write_glob_artifacts(&config.glob_dir(), &cache.snapshot()).unwrap();

  let glob_dir = config.glob_dir();
  assert_eq!(
    paths,
    vec![glob_dir.join("include/__/__h.glob"), glob_dir.join("src/__c__src/test_c.glob")]
  );
  assert_eq!(fs::read_to_string(&paths[1]).unwrap(), "src/a.c\nsrc/b.c\n");

  let dep_file = fs::read_to_string(glob_dir.join("include/__/__h.glob.d")).unwrap();
  assert!(dep_file.ends_with(": \\\n include \\\n include/x\n"));
}

#[test]
fn rerunning_an_unchanged_generation_keeps_glob_files() {
  let temp = tempdir().unwrap();
  let glob_dir = temp.path().join(".glob");

  let first = GlobCache::new(tree());
  first.resolve("src/*.c", &[]).unwrap();
  let paths = write_glob_artifacts(&glob_dir, &first.snapshot()).unwrap();
  let written = fs::metadata(&paths[0]).unwrap().modified().unwrap();

  let second = GlobCache::new(tree());
  second.resolve("src/*.c", &[]).unwrap();
  write_glob_artifacts(&glob_dir, &second.snapshot()).unwrap();

  assert_eq!(fs::metadata(&paths[0]).unwrap().modified().unwrap(), written);
}
