//! Internal-invariant faults.
//!
//! A `Fault` means the surrounding system broke a contract this crate relies
//! on (two different glob queries mapping to one cache key, a duplicate name
//! surviving registration). It is never a user error and is not returned
//! through `Result`: [`Fault::raise`] logs it and unwinds with the `Fault` as
//! the panic payload. Harnesses that need to observe it use [`catch_fault`].

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
  #[error("mismatched patterns {requested:?} and {stored:?} for glob file {key:?}")]
  GlobPatternMismatch {
    key: String,
    requested: String,
    stored: String,
  },

  #[error("mismatched excludes {requested:?} and {stored:?} for glob file {key:?}")]
  GlobExcludesMismatch {
    key: String,
    requested: Vec<String>,
    stored: Vec<String>,
  },

  #[error("duplicate module group name {0:?}")]
  DuplicateGroupName(String),
}

impl Fault {
  /// Report the fault and unwind. Never returns.
  pub fn raise(self) -> ! {
    error!(fault = %self, "internal invariant violated");
    panic::panic_any(self)
  }
}

/// Run `f`, converting an unwinding [`Fault`] into `Err`.
///
/// Panics that do not carry a `Fault` keep unwinding.
pub fn catch_fault<R>(f: impl FnOnce() -> R) -> Result<R, Fault> {
  match panic::catch_unwind(AssertUnwindSafe(f)) {
    Ok(value) => Ok(value),
    Err(payload) => match payload.downcast::<Fault>() {
      Ok(fault) => Err(*fault),
      Err(other) => panic::resume_unwind(other),
    },
  }
}
