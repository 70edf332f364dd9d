//! Interpreter Locator: pick the base interpreter a session is seeded from.
//!
//! An explicit path is validated as-is. Otherwise the interpreter of the active
//! environment wins, then `PATH` is probed in decreasing version order.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tempvenv_core::config::ActiveEnvConfig;

use crate::error::{Result, VenvError};
use crate::provisioner::interpreter_in;

/// `PATH` names probed when no explicit interpreter is given, most preferred first.
#[cfg(not(windows))]
pub const PATH_CANDIDATES: &[&str] = &[
    "python3.13",
    "python3.12",
    "python3.11",
    "python3.10",
    "python3.9",
    "python3.8",
    "python3",
    "python",
];

#[cfg(windows)]
pub const PATH_CANDIDATES: &[&str] = &["python3", "python", "py"];

/// Where to look for a base interpreter. `from_env` captures the process view;
/// tests build one by hand.
#[derive(Debug, Clone)]
pub struct InterpreterSearch {
    /// Prefixes of active environments (`$VIRTUAL_ENV`, `$CONDA_PREFIX`).
    pub active_prefixes: Vec<PathBuf>,
    /// Names resolved against `search_path`.
    pub names: Vec<String>,
    /// `None` means the process `PATH`.
    pub search_path: Option<OsString>,
}

impl InterpreterSearch {
    pub fn from_env() -> Self {
        Self {
            active_prefixes: ActiveEnvConfig::prefixes()
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            names: PATH_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            search_path: None,
        }
    }

    /// Resolve the base interpreter. No side effects.
    pub fn locate(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => self.validate_explicit(path),
            None => self.probe(),
        }
    }

    fn validate_explicit(&self, path: &Path) -> Result<PathBuf> {
        let bare_name = path.components().count() == 1 && !path.is_absolute();
        if bare_name && !path.exists() {
            if let Some(found) = self.which(path.as_os_str()) {
                return Ok(found);
            }
        }
        if is_executable(path) {
            return absolute(path);
        }
        Err(VenvError::Configuration(format!(
            "specified interpreter not found or not executable: {}",
            path.display()
        )))
    }

    fn probe(&self) -> Result<PathBuf> {
        let mut tried = Vec::new();
        for prefix in &self.active_prefixes {
            for candidate in prefix_interpreters(prefix) {
                if is_executable(&candidate) {
                    tracing::debug!("Using interpreter of active environment {}", prefix.display());
                    return Ok(candidate);
                }
                tried.push(candidate.display().to_string());
            }
        }
        for name in &self.names {
            if let Some(found) = self.which(name.as_ref()) {
                return Ok(found);
            }
            tried.push(name.clone());
        }
        Err(VenvError::EnvironmentResolution { tried })
    }

    fn which(&self, name: &std::ffi::OsStr) -> Option<PathBuf> {
        let found = match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().ok()?;
                which::which_in(name, Some(paths), cwd)
            }
            None => which::which(name),
        };
        found.ok().filter(|p| is_executable(p))
    }
}

/// Interpreter locations under an active environment prefix, most preferred first.
fn prefix_interpreters(prefix: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![interpreter_in(prefix)];
    if cfg!(windows) {
        // conda keeps python.exe at the prefix root
        candidates.push(prefix.join("python.exe"));
    }
    candidates
}

/// Convenience wrapper over [`InterpreterSearch::from_env`].
pub fn locate_interpreter(explicit: Option<&Path>) -> Result<PathBuf> {
    InterpreterSearch::from_env().locate(explicit)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| VenvError::io("Resolve current directory", e))?;
    Ok(cwd.join(path))
}

/// Whether `path` is an existing regular file the current user may execute.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
