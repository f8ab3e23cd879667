//! Name registry driven through the `NameInterface` trait object.

use bpgen_lib::fault::catch_fault;
use bpgen_lib::names::{ModuleGroup, NameError, NameInterface, NamespaceContext, Pos, SimpleNameInterface};

fn declare(names: &mut dyn NameInterface, file: &str, name: &str, line: u32) -> Result<(), NameError> {
  let ctx = NamespaceContext::new(file);
  names.new_module(&ctx, ModuleGroup::new(name, Pos::new(file, line, 1)))?;
  Ok(())
}

#[test]
fn modules_from_several_files_share_the_flat_namespace() {
  let mut names: Box<dyn NameInterface> = Box::new(SimpleNameInterface::new());
  declare(names.as_mut(), "lib/Blueprints", "libfoo", 1).unwrap();
  declare(names.as_mut(), "app/Blueprints", "app", 4).unwrap();

  let err = declare(names.as_mut(), "app/Blueprints", "libfoo", 12).unwrap_err();

  assert_eq!(
    err.to_string(),
    "module \"libfoo\" already defined\n       lib/Blueprints:1:1 <-- previous definition here"
  );
  let ns = names.get_namespace(&NamespaceContext::new("app/Blueprints"));
  assert_eq!(names.module_from_name("libfoo", &ns).unwrap().pos().file, "lib/Blueprints");
}

#[test]
fn rename_then_enumerate() {
  let mut names = SimpleNameInterface::new();
  for (i, name) in ["c", "a", "b"].iter().enumerate() {
    declare(&mut names, "Blueprints", name, i as u32 + 1).unwrap();
  }
  let ns = names.get_namespace(&NamespaceContext::new("Blueprints"));

  names.rename("c", "d", &ns).unwrap();
  let err = names.rename("a", "b", &ns).unwrap_err();

  assert!(matches!(err, NameError::RenameConflict { ref existing, .. } if existing.line == 3));
  let all = catch_fault(|| names.all_modules()).unwrap();
  let order: Vec<String> = all.iter().map(ModuleGroup::name).collect();
  assert_eq!(order, vec!["a", "b", "d"]);
  assert!(all.windows(2).all(|w| w[0].name() < w[1].name()));
}

#[test]
fn missing_dependency_names_both_sides() {
  let names = SimpleNameInterface::new();
  let ns = names.get_namespace(&NamespaceContext::new("Blueprints"));

  let err = names.missing_dependency_error("app", &ns, "libz");

  assert_eq!(
    err,
    NameError::MissingDependency {
      depender: "app".to_string(),
      dependency: "libz".to_string(),
    }
  );
}
