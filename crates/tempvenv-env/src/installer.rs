//! Dependency Installer: aggregate requested specifiers and install them into
//! a provisioned environment with one installer invocation.
//!
//! Order: requirements-file lines first, then the explicit package list.

use std::path::Path;
use std::process::Command;

use crate::error::{Result, VenvError};
use crate::options::Backend;
use crate::process::{display_command, run_captured};
use crate::provisioner::uv_launcher;
use crate::{progress, verbose_warn};

/// Inputs to one installation step.
#[derive(Debug, Clone, Copy)]
pub struct InstallRequest<'a> {
    pub base_python: &'a Path,
    pub session_python: &'a Path,
    pub backend: Backend,
    pub uv: Option<&'a Path>,
    pub packages: &'a [String],
    pub requirements_file: Option<&'a Path>,
    pub pip_present: bool,
    pub pip_options: &'a [String],
    pub verbose: bool,
}

/// What the installation step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Nothing was requested.
    Nothing,
    Installed(Vec<String>),
    /// Packages were requested but the environment has no installer.
    Skipped(Vec<String>),
}

impl InstallOutcome {
    /// Every specifier that was requested, in installer order.
    pub fn requested(&self) -> &[String] {
        match self {
            Self::Nothing => &[],
            Self::Installed(p) | Self::Skipped(p) => p,
        }
    }
}

/// Options whose value is a path relative to the requirements file.
const FILE_OPTIONS: &[&str] = &["-r", "--requirement", "-c", "--constraint"];

/// Parse requirements-file content: one specifier per line, blanks and `#` comments dropped.
///
/// Option lines (`-r base.txt`, `--index-url URL`) are split on whitespace so
/// each token reaches the installer as its own argument.
pub fn parse_requirements(content: &str) -> Vec<String> {
    let mut args = Vec::new();
    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('-') {
            args.extend(line.split_whitespace().map(String::from));
        } else {
            args.push(line.to_string());
        }
    }
    args
}

/// Rebase relative `-r` / `-c` targets onto `base`, the requirements file's directory.
fn rebase_file_options(args: Vec<String>, base: &Path) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut expect_path = false;
    for arg in args {
        if expect_path {
            expect_path = false;
            if Path::new(&arg).is_relative() {
                out.push(base.join(&arg).display().to_string());
                continue;
            }
        } else if FILE_OPTIONS.contains(&arg.as_str()) {
            expect_path = true;
        }
        out.push(arg);
    }
    out
}

/// Requirements-file specifiers followed by `packages`.
///
/// A missing requirements file is skipped with a warning (visible when verbose).
pub fn collect_requirements(
    packages: &[String],
    requirements_file: Option<&Path>,
    verbose: bool,
) -> Result<Vec<String>> {
    let mut specs = Vec::new();
    if let Some(path) = requirements_file {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                specs.extend(rebase_file_options(parse_requirements(&content), base));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                verbose_warn!(
                    verbose,
                    "Warning: Requirements file {} not found. It will be ignored.",
                    path.display()
                );
            }
            Err(e) => {
                return Err(VenvError::Configuration(format!(
                    "cannot read requirements file {}: {}",
                    path.display(),
                    e
                )));
            }
        }
    }
    specs.extend(packages.iter().cloned());
    Ok(specs)
}

/// Install every requested specifier, or skip when the installer is absent.
pub fn install(req: &InstallRequest<'_>) -> Result<InstallOutcome> {
    let specs = collect_requirements(req.packages, req.requirements_file, req.verbose)?;
    if specs.is_empty() {
        progress!(req.verbose, "No packages requested; skipping installation");
        return Ok(InstallOutcome::Nothing);
    }
    if !req.pip_present {
        verbose_warn!(
            req.verbose,
            "Package installer not included (ensure_installer = false); skipping installation of: {}",
            specs.join(" ")
        );
        return Ok(InstallOutcome::Skipped(specs));
    }

    progress!(
        req.verbose,
        "Installing specified packages using {}: {}",
        req.backend,
        specs.join(" ")
    );
    let mut cmd = install_command(req, &specs);
    progress!(
        req.verbose,
        "Running package installation command: {}",
        display_command(&cmd)
    );

    let out = run_captured(&mut cmd).map_err(|e| VenvError::Installation {
        packages: specs.clone(),
        diagnostics: format!("failed to launch {}: {}", display_command(&cmd), e),
    })?;
    if !out.success() {
        return Err(VenvError::Installation {
            packages: specs,
            diagnostics: out.diagnostics(),
        });
    }
    Ok(InstallOutcome::Installed(specs))
}

/// Installer command line: options first, then specifiers.
pub fn install_command(req: &InstallRequest<'_>, specs: &[String]) -> Command {
    let mut cmd = match req.backend {
        Backend::Venv => {
            let mut cmd = Command::new(req.session_python);
            cmd.args(["-m", "pip", "install"]);
            cmd
        }
        Backend::Uv => {
            let mut cmd = uv_launcher(req.uv, req.base_python);
            cmd.args(["pip", "install", "--python"])
                .arg(req.session_python);
            cmd
        }
    };
    cmd.args(req.pip_options).args(specs);
    cmd
}
