//! Liveness tracking over realistic rule and statement shapes.

use std::collections::HashMap;

use bpgen_lib::defs::{BuildDef, EvalContext, Evaluation, Pool, PoolDef, Rule, RuleDef, Variable};
use bpgen_lib::live::{LiveError, LiveTracker};
use bpgen_lib::template::{TemplateString, parse};

use super::common::{Toolchain, toolchain_ctx, toolchain_variable};

#[test]
fn compiler_variable_in_command_deps_is_live() {
  let cc = toolchain_variable("CC", |t| &t.cc);
  let cc_dep = TemplateString::variable(&cc);
  let rule = Rule::fixed("cc", RuleDef::new().with_command_deps(vec![cc_dep]));

  let tracker = LiveTracker::new(toolchain_ctx("clang"));
  tracker.add_build_def_deps(&mut BuildDef::new(rule.clone())).unwrap();
  let live = tracker.into_live_set();

  assert_eq!(live.rules.keys().collect::<Vec<_>>(), vec![&rule]);
  assert_eq!(live.variables.len(), 1);
  assert_eq!(live.variables[&cc], TemplateString::literal("clang"));
  assert!(live.pools.is_empty());
}

#[test]
fn parsed_compile_rule_reaches_everything_it_names() {
  let cc = toolchain_variable("cc", |t| &t.cc);
  let cflags = toolchain_variable("cflags", |t| &t.cflags);
  let input = Variable::argument("in");
  let output = Variable::argument("out");
  let scope: HashMap<String, Variable> = [&cc, &cflags, &input, &output]
    .into_iter()
    .map(|v| (v.name().to_string(), v.clone()))
    .collect();

  let command = parse("$cc ${cflags} -c $in -o $out", &scope).unwrap();
  let pool = Pool::fixed("highmem", PoolDef::new(4));
  let rule_def = RuleDef::new()
    .with_command(command)
    .with_variable("description", parse("CC $out", &scope).unwrap())
    .with_pool(pool.clone());
  let rule = Rule::fixed("compile", rule_def.clone());

  let tracker = LiveTracker::new(toolchain_ctx("gcc"));
  let mut def = BuildDef::new(rule.clone())
    .with_outputs(vec!["obj/main.o".into()])
    .with_inputs(vec!["src/main.c".into()]);
  tracker.add_build_def_deps(&mut def).unwrap();

  assert_eq!(def.rule_def.as_deref(), Some(&rule_def));
  let live = tracker.into_live_set();
  let sorted = live.sorted_variables();
  let names: Vec<&str> = sorted.iter().map(|(v, _)| v.name()).collect();
  assert_eq!(names, vec!["cc", "cflags"]);
  assert_eq!(live.pools[&pool], PoolDef::new(4));
  assert!(live.rules.contains_key(&rule));
}

#[test]
fn phony_statements_record_only_their_paths() {
  let phony = Rule::builtin("phony");
  let out_dir = Variable::fixed("outdir", TemplateString::literal("out"));

  let tracker = LiveTracker::new(EvalContext::empty());
  let mut def = BuildDef::new(phony.clone())
    .with_outputs(vec![TemplateString::literal("all")])
    .with_inputs(vec![TemplateString::variable(&out_dir).with_literal("/app")]);
  tracker.add_build_def_deps(&mut def).unwrap();

  assert_eq!(def.rule_def, None);
  assert!(!tracker.is_rule_live(&phony));
  assert!(tracker.is_variable_live(&out_dir));
}

#[test]
fn many_statements_share_one_evaluation() {
  let cc = toolchain_variable("CC", |t| &t.cc);
  let rule = Rule::fixed("cc", RuleDef::new().with_command(TemplateString::variable(&cc)));
  let tracker = LiveTracker::new(toolchain_ctx("clang"));

  for i in 0..16 {
    let mut def = BuildDef::new(rule.clone()).with_outputs(vec![format!("obj/{i}.o").into()]);
    tracker.add_build_def_deps(&mut def).unwrap();
  }

  assert!(tracker.remove_variable_if_live(&cc));
  assert!(!tracker.remove_variable_if_live(&cc));
  assert!(tracker.remove_rule_if_live(&rule));
  assert!(tracker.into_live_set().is_empty());
}

#[test]
fn missing_context_configuration_is_an_error() {
  let cc = toolchain_variable("CC", |t| &t.cc);
  let rule = Rule::fixed("cc", RuleDef::new().with_command(TemplateString::variable(&cc)));
  let tracker = LiveTracker::new(EvalContext::new("not a toolchain"));

  let err = tracker.add_build_def_deps(&mut BuildDef::new(rule.clone())).unwrap_err();

  assert!(matches!(err, LiveError::Evaluation { ref name, .. } if name == "CC"));
  assert!(err.to_string().contains("context carries no toolchain"));
  assert!(!tracker.is_variable_live(&cc));
}

#[test]
fn context_is_visible_to_rule_resolvers() {
  let rule = Rule::new("link", |ctx| {
    let toolchain = ctx.get::<Toolchain>().ok_or("no toolchain")?;
    Ok(Evaluation::Value(
      RuleDef::new().with_command(TemplateString::literal(format!("{} $in -o $out", toolchain.cc))),
    ))
  });
  let tracker = LiveTracker::new(toolchain_ctx("clang"));

  let mut def = BuildDef::new(rule);
  tracker.add_build_def_deps(&mut def).unwrap();

  let rule_def = def.rule_def.unwrap();
  assert_eq!(rule_def.variables["command"].render(), "clang $$in -o $$out");
}
