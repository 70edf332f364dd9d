//! Construction-time configuration for a [`crate::TempVenv`].

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tempvenv_core::config::VenvDefaults;

use crate::error::{Result, VenvError};

/// External mechanism used to create the environment and install into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// `python -m venv` + `python -m pip install`
    #[default]
    Venv,
    /// `uv venv` + `uv pip install`
    Uv,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Venv => "venv",
            Self::Uv => "uv",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = VenvError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "venv" => Ok(Self::Venv),
            "uv" => Ok(Self::Uv),
            other => Err(VenvError::Configuration(format!(
                "unknown backend '{}' (expected 'venv' or 'uv')",
                other
            ))),
        }
    }
}

/// Options recognised by [`crate::TempVenv::new`].
///
/// `pip_options` and `venv_options` are opaque: they are appended verbatim to
/// the installer and environment-creation command lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenvOptions {
    pub packages: Vec<String>,
    pub requirements_file: Option<PathBuf>,
    pub python_executable: Option<PathBuf>,
    pub ensure_installer: bool,
    pub cleanup: bool,
    pub verbose: bool,
    pub pip_options: Vec<String>,
    pub venv_options: Vec<String>,
    pub backend: Backend,
    /// `uv` executable for [`Backend::Uv`].
    pub uv_executable: Option<PathBuf>,
}

impl Default for VenvOptions {
    fn default() -> Self {
        Self {
            packages: Vec::new(),
            requirements_file: None,
            python_executable: None,
            ensure_installer: true,
            cleanup: true,
            verbose: false,
            pip_options: Vec::new(),
            venv_options: Vec::new(),
            backend: Backend::Venv,
            uv_executable: None,
        }
    }
}

impl VenvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from `TEMPVENV_*` environment defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_defaults(&VenvDefaults::from_env())
    }

    pub fn from_defaults(defaults: &VenvDefaults) -> Result<Self> {
        let backend = match defaults.backend.as_deref() {
            Some(name) => name.parse()?,
            None => Backend::default(),
        };
        Ok(Self {
            python_executable: defaults.python.as_ref().map(PathBuf::from),
            cleanup: !defaults.keep,
            verbose: defaults.verbose,
            pip_options: defaults.pip_options.clone(),
            venv_options: defaults.venv_options.clone(),
            backend,
            uv_executable: defaults.uv.as_ref().map(PathBuf::from),
            ..Self::default()
        })
    }

    pub fn package(mut self, spec: impl Into<String>) -> Self {
        self.packages.push(spec.into());
        self
    }

    pub fn packages<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages.extend(specs.into_iter().map(Into::into));
        self
    }

    pub fn requirements_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.requirements_file = Some(path.into());
        self
    }

    pub fn python_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.python_executable = Some(path.into());
        self
    }

    pub fn ensure_installer(mut self, yes: bool) -> Self {
        self.ensure_installer = yes;
        self
    }

    pub fn cleanup(mut self, yes: bool) -> Self {
        self.cleanup = yes;
        self
    }

    pub fn verbose(mut self, yes: bool) -> Self {
        self.verbose = yes;
        self
    }

    pub fn pip_option(mut self, opt: impl Into<String>) -> Self {
        self.pip_options.push(opt.into());
        self
    }

    pub fn venv_option(mut self, opt: impl Into<String>) -> Self {
        self.venv_options.push(opt.into());
        self
    }

    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn uv_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.uv_executable = Some(path.into());
        self
    }
}
