//! Scoped, disposable Python virtual environments.
//!
//! A [`TempVenv`] locates a base interpreter, builds a fresh environment in a
//! unique temporary directory, installs the requested packages into it and
//! hands the caller the environment's interpreter. Teardown is guaranteed when
//! the scope ends.
//!
//! ```no_run
//! use tempvenv_env::{with_temp_venv, VenvOptions};
//!
//! let _output = with_temp_venv(VenvOptions::new().package("six"), |python| {
//!     std::process::Command::new(python)
//!         .args(["-c", "import six; print(six.__version__)"])
//!         .output()
//! })??;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod installer;
pub mod locator;
pub mod log;
pub mod options;
pub mod process;
pub mod provisioner;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Result, VenvError, VenvErrorKind};
pub use locator::{locate_interpreter, InterpreterSearch};
pub use options::{Backend, VenvOptions};
pub use session::{with_temp_venv, ActiveVenv, SessionState, TempVenv};
