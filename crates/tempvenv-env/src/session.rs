//! Scope Guard: the single-use lifecycle controller.
//!
//! `Created → Provisioning → Installing → Active → Closed`, with
//! `* → Failed → Closed` on any error during `open`. A failed open always
//! removes the root directory; `cleanup` only governs the successful exit.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Result, VenvError};
use crate::installer::{install, InstallOutcome, InstallRequest};
use crate::locator::InterpreterSearch;
use crate::options::VenvOptions;
use crate::progress;
use crate::provisioner::{provision, remove_quietly, ProvisionRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    Provisioning,
    Installing,
    Active,
    Failed,
    Closed,
}

/// A disposable virtual environment. Open it once, use the interpreter, close it.
///
/// Dropping an open session closes it (honouring `cleanup`).
#[derive(Debug)]
pub struct TempVenv {
    options: VenvOptions,
    search: InterpreterSearch,
    state: SessionState,
    base_python: Option<PathBuf>,
    root: Option<PathBuf>,
    python: Option<PathBuf>,
    dir: Option<TempDir>,
    pip_present: bool,
    requested: Vec<String>,
    skipped: Vec<String>,
}

impl TempVenv {
    pub fn new(options: VenvOptions) -> Self {
        Self::with_search(options, InterpreterSearch::from_env())
    }

    /// Use a custom interpreter search instead of the process environment.
    pub fn with_search(options: VenvOptions, search: InterpreterSearch) -> Self {
        Self {
            options,
            search,
            state: SessionState::Created,
            base_python: None,
            root: None,
            python: None,
            dir: None,
            pip_present: false,
            requested: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Provision the environment and return a guard that closes it on drop.
    pub fn open(&mut self) -> Result<ActiveVenv<'_>> {
        self.enter()?;
        Ok(ActiveVenv { venv: self })
    }

    /// Open, run `f` with the session interpreter, then close.
    ///
    /// The session is closed even if `f` panics.
    pub fn scope<T>(&mut self, f: impl FnOnce(&Path) -> T) -> Result<T> {
        let active = self.open()?;
        let value = f(active.python());
        active.close()?;
        Ok(value)
    }

    fn enter(&mut self) -> Result<()> {
        if self.state != SessionState::Created {
            return Err(VenvError::Usage(format!(
                "a TempVenv can only be opened once (current state: {:?})",
                self.state
            )));
        }
        self.state = SessionState::Provisioning;
        match self.provision_and_install() {
            Ok(()) => {
                self.state = SessionState::Active;
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Failed;
                self.python = None;
                if let Some(dir) = self.dir.take() {
                    progress!(
                        self.options.verbose,
                        "Setup failed; removing temporary directory: {}",
                        dir.path().display()
                    );
                    remove_quietly(dir);
                }
                self.state = SessionState::Closed;
                Err(e)
            }
        }
    }

    fn provision_and_install(&mut self) -> Result<()> {
        let opts = &self.options;
        let base = self.search.locate(opts.python_executable.as_deref())?;
        progress!(opts.verbose, "Found suitable Python executable: {}", base.display());

        let env = provision(&ProvisionRequest {
            base_python: &base,
            backend: opts.backend,
            uv: opts.uv_executable.as_deref(),
            ensure_installer: opts.ensure_installer,
            venv_options: &opts.venv_options,
            verbose: opts.verbose,
        })?;
        self.root = Some(env.dir.path().to_path_buf());
        self.python = Some(env.python.clone());
        self.dir = Some(env.dir);
        self.pip_present = opts.ensure_installer;
        self.state = SessionState::Installing;

        let outcome = install(&InstallRequest {
            base_python: &base,
            session_python: &env.python,
            backend: opts.backend,
            uv: opts.uv_executable.as_deref(),
            packages: &opts.packages,
            requirements_file: opts.requirements_file.as_deref(),
            pip_present: self.pip_present,
            pip_options: &opts.pip_options,
            verbose: opts.verbose,
        })?;
        self.requested = outcome.requested().to_vec();
        if let InstallOutcome::Skipped(skipped) = outcome {
            self.skipped = skipped;
        }
        self.base_python = Some(base);
        Ok(())
    }

    /// Close an active session. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        match self.state {
            SessionState::Active => {}
            SessionState::Closed => return Ok(()),
            other => {
                return Err(VenvError::Usage(format!(
                    "cannot close a TempVenv that was never opened (current state: {:?})",
                    other
                )))
            }
        }
        self.state = SessionState::Closed;
        self.python = None;
        let Some(dir) = self.dir.take() else {
            return Ok(());
        };
        let path = dir.path().to_path_buf();

        if !self.options.cleanup {
            progress!(
                self.options.verbose,
                "Skipping cleanup of temporary directory: {}",
                path.display()
            );
            let _ = dir.keep();
            return Ok(());
        }

        progress!(
            self.options.verbose,
            "Cleaning up temporary directory: {}",
            path.display()
        );
        match dir.close() {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VenvError::io(
                format!("Remove temporary directory {}", path.display()),
                e,
            )),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn options(&self) -> &VenvOptions {
        &self.options
    }

    /// Session interpreter; `Some` only while the session is active.
    pub fn python(&self) -> Option<&Path> {
        self.python.as_deref()
    }

    pub fn base_interpreter(&self) -> Option<&Path> {
        self.base_python.as_deref()
    }

    /// Root directory; stays readable after close.
    pub fn root_directory(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn pip_present(&self) -> bool {
        self.pip_present
    }

    /// Specifiers handed to (or withheld from) the installer, in installer order.
    pub fn requested_packages(&self) -> &[String] {
        &self.requested
    }

    /// Specifiers not installed because the installer component was omitted.
    pub fn skipped_packages(&self) -> &[String] {
        &self.skipped
    }
}

impl Drop for TempVenv {
    fn drop(&mut self) {
        if self.state == SessionState::Active {
            if let Err(e) = self.close() {
                tracing::warn!("Failed to close temporary environment: {}", e);
            }
        }
    }
}

/// Borrow of an open [`TempVenv`]. Closes the session when dropped.
#[derive(Debug)]
pub struct ActiveVenv<'a> {
    venv: &'a mut TempVenv,
}

impl ActiveVenv<'_> {
    /// Interpreter inside the environment.
    pub fn python(&self) -> &Path {
        self.venv
            .python
            .as_deref()
            .unwrap_or_else(|| Path::new(""))
    }

    pub fn root_directory(&self) -> &Path {
        self.venv.root.as_deref().unwrap_or_else(|| Path::new(""))
    }

    pub fn session(&self) -> &TempVenv {
        self.venv
    }

    /// Close now and surface any teardown error.
    pub fn close(self) -> Result<()> {
        self.venv.close()
    }
}

impl Drop for ActiveVenv<'_> {
    fn drop(&mut self) {
        if self.venv.state == SessionState::Active {
            if let Err(e) = self.venv.close() {
                tracing::warn!("Failed to close temporary environment: {}", e);
            }
        }
    }
}

/// Open a session from `options`, run `f` with its interpreter, and tear it down.
pub fn with_temp_venv<T>(options: VenvOptions, f: impl FnOnce(&Path) -> T) -> Result<T> {
    TempVenv::new(options).scope(f)
}
