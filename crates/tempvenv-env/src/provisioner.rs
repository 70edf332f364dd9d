//! Environment Provisioner: allocate a unique root directory and materialize
//! an isolated environment inside it.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::error::{Result, VenvError};
use crate::locator::is_executable;
use crate::options::Backend;
use crate::process::{display_command, run_captured};
use crate::progress;

/// Prefix of every allocated root directory.
pub const ROOT_PREFIX: &str = "tempvenv-";

/// Platform binary subdirectory of an environment (`bin` / `Scripts`).
pub fn bin_dir(root: &Path) -> PathBuf {
    if cfg!(windows) {
        root.join("Scripts")
    } else {
        root.join("bin")
    }
}

/// Interpreter path inside an environment rooted at `root`.
pub fn interpreter_in(root: &Path) -> PathBuf {
    if cfg!(windows) {
        bin_dir(root).join("python.exe")
    } else {
        bin_dir(root).join("python")
    }
}

/// A freshly materialized environment. Dropping it removes `dir`.
#[derive(Debug)]
pub struct ProvisionedEnv {
    pub dir: TempDir,
    pub python: PathBuf,
}

/// Inputs to one provisioning attempt.
#[derive(Debug, Clone, Copy)]
pub struct ProvisionRequest<'a> {
    pub base_python: &'a Path,
    pub backend: Backend,
    /// `uv` executable for [`Backend::Uv`]; `None` searches `PATH`.
    pub uv: Option<&'a Path>,
    pub ensure_installer: bool,
    pub venv_options: &'a [String],
    pub verbose: bool,
}

/// Allocate a collision-free directory under the system temp area.
pub fn allocate_root() -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix(ROOT_PREFIX)
        .tempdir()
        .map_err(|e| VenvError::io("Create temporary directory", e))
}

/// Create a new root directory and build the environment in it.
///
/// On any failure the directory is removed before the error is returned.
pub fn provision(req: &ProvisionRequest<'_>) -> Result<ProvisionedEnv> {
    let dir = allocate_root()?;
    progress!(req.verbose, "Creating temporary directory: {}", dir.path().display());

    let result = materialize(req, dir.path());
    match result {
        Ok(python) => Ok(ProvisionedEnv { dir, python }),
        Err(e) => {
            remove_quietly(dir);
            Err(e)
        }
    }
}

fn materialize(req: &ProvisionRequest<'_>, root: &Path) -> Result<PathBuf> {
    progress!(
        req.verbose,
        "Creating virtual environment using {} in {}",
        req.backend,
        root.display()
    );
    let mut cmd = creation_command(req, root);
    progress!(
        req.verbose,
        "Running environment creation command: {}",
        display_command(&cmd)
    );

    let out = run_captured(&mut cmd).map_err(|e| VenvError::Provisioning {
        root: root.to_path_buf(),
        diagnostics: format!("failed to launch {}: {}", display_command(&cmd), e),
    })?;
    if !out.success() {
        return Err(VenvError::Provisioning {
            root: root.to_path_buf(),
            diagnostics: out.diagnostics(),
        });
    }

    let python = interpreter_in(root);
    if !is_executable(&python) {
        return Err(VenvError::Provisioning {
            root: root.to_path_buf(),
            diagnostics: format!(
                "environment created but interpreter missing at {}",
                python.display()
            ),
        });
    }
    progress!(req.verbose, "Virtual environment ready: {}", python.display());
    Ok(python)
}

/// Environment-creation command line for `req`, targeting `root`.
pub fn creation_command(req: &ProvisionRequest<'_>, root: &Path) -> Command {
    match req.backend {
        Backend::Venv => {
            let mut cmd = Command::new(req.base_python);
            cmd.arg("-m").arg("venv");
            if !req.ensure_installer {
                cmd.arg("--without-pip");
            }
            cmd.args(req.venv_options).arg(root);
            cmd
        }
        Backend::Uv => {
            let mut cmd = uv_launcher(req.uv, req.base_python);
            cmd.arg("venv").arg(root).arg("--python").arg(req.base_python);
            if req.ensure_installer {
                cmd.arg("--seed");
            }
            cmd.args(req.venv_options);
            cmd
        }
    }
}

/// The configured `uv`, else `uv` from `PATH`, else `<base> -m uv`.
pub(crate) fn uv_launcher(uv: Option<&Path>, base_python: &Path) -> Command {
    if let Some(uv) = uv {
        return Command::new(uv);
    }
    match which::which("uv") {
        Ok(uv) => Command::new(uv),
        Err(_) => {
            let mut cmd = Command::new(base_python);
            cmd.arg("-m").arg("uv");
            cmd
        }
    }
}

/// Remove a root directory, tolerating it already being gone.
pub(crate) fn remove_quietly(dir: TempDir) {
    let path = dir.path().to_path_buf();
    if let Err(e) = dir.close() {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpreter_layout() {
        let root = Path::new("/tmp/tempvenv-abc");
        #[cfg(unix)]
        assert_eq!(interpreter_in(root), Path::new("/tmp/tempvenv-abc/bin/python"));
        assert!(interpreter_in(root).starts_with(bin_dir(root)));
    }

    #[test]
    fn test_allocate_root_is_unique() {
        let a = allocate_root().unwrap();
        let b = allocate_root().unwrap();
        assert_ne!(a.path(), b.path());
        assert!(a
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(ROOT_PREFIX));
    }

    #[test]
    fn test_venv_command_without_pip() {
        let opts = vec!["--copies".to_string()];
        let req = ProvisionRequest {
            base_python: Path::new("/usr/bin/python3"),
            backend: Backend::Venv,
            uv: None,
            ensure_installer: false,
            venv_options: &opts,
            verbose: false,
        };
        let cmd = creation_command(&req, Path::new("/tmp/tempvenv-x"));
        assert_eq!(
            display_command(&cmd),
            "/usr/bin/python3 -m venv --without-pip --copies /tmp/tempvenv-x"
        );
    }

    #[test]
    fn test_venv_command_with_pip() {
        let req = ProvisionRequest {
            base_python: Path::new("/usr/bin/python3"),
            backend: Backend::Venv,
            uv: None,
            ensure_installer: true,
            venv_options: &[],
            verbose: false,
        };
        let cmd = creation_command(&req, Path::new("/tmp/tempvenv-x"));
        assert_eq!(
            display_command(&cmd),
            "/usr/bin/python3 -m venv /tmp/tempvenv-x"
        );
    }

    #[test]
    fn test_uv_command_passes_python_selector() {
        let opts = vec!["--prompt".to_string(), "scratch".to_string()];
        let req = ProvisionRequest {
            base_python: Path::new("/usr/bin/python3"),
            backend: Backend::Uv,
            uv: None,
            ensure_installer: true,
            venv_options: &opts,
            verbose: false,
        };
        let line = display_command(&creation_command(&req, Path::new("/tmp/tempvenv-x")));
        assert!(
            line.ends_with("venv /tmp/tempvenv-x --python /usr/bin/python3 --seed --prompt scratch"),
            "{line}"
        );
    }

    #[test]
    fn test_configured_uv_executable_is_used() {
        let req = ProvisionRequest {
            base_python: Path::new("/usr/bin/python3"),
            backend: Backend::Uv,
            uv: Some(Path::new("/opt/uv/bin/uv")),
            ensure_installer: false,
            venv_options: &[],
            verbose: false,
        };
        assert_eq!(
            display_command(&creation_command(&req, Path::new("/tmp/tempvenv-x"))),
            "/opt/uv/bin/uv venv /tmp/tempvenv-x --python /usr/bin/python3"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_creation_removes_root() {
        let tmp = tempfile::tempdir().unwrap();
        let base = crate::test_support::fake_python(tmp.path());
        let opts = vec![crate::test_support::FAIL_VENV_FLAG.to_string()];
        let req = ProvisionRequest {
            base_python: &base,
            backend: Backend::Venv,
            uv: None,
            ensure_installer: true,
            venv_options: &opts,
            verbose: false,
        };
        match provision(&req).unwrap_err() {
            VenvError::Provisioning { root, diagnostics } => {
                assert!(!root.exists());
                assert!(diagnostics.contains("simulated venv failure"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_provision_creates_interpreter() {
        let tmp = tempfile::tempdir().unwrap();
        let base = crate::test_support::fake_python(tmp.path());
        let req = ProvisionRequest {
            base_python: &base,
            backend: Backend::Venv,
            uv: None,
            ensure_installer: true,
            venv_options: &[],
            verbose: false,
        };
        let env = provision(&req).unwrap();
        assert!(is_executable(&env.python));
        assert_ne!(env.python, base);
        let root = env.dir.path().to_path_buf();
        drop(env);
        assert!(!root.exists());
    }
}
