//! bpgen-lib: bookkeeping core of a build-file generator.
//!
//! While module definitions are turned into build-tool statements, this
//! crate keeps track of what the emitted file needs:
//! - [`live`]: the variables, rules and pools reachable from emitted
//!   statements, each evaluated once
//! - [`glob`]: memoized glob queries and the artifacts that let a later build
//!   notice when a glob's result changed
//! - [`names`]: the module-group name registry
//!
//! Definitions are declared through the handles in [`defs`] and carry
//! [`template`] strings that embed variable references.

pub mod config;
pub mod consts;
pub mod defs;
pub mod fault;
pub mod glob;
pub mod live;
pub mod names;
pub mod template;
pub mod util;
