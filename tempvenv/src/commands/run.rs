//! `tempvenv run`: open a session, run its interpreter, close the session.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;

use tempvenv_env::{Backend, TempVenv, VenvOptions};

/// Flags of `tempvenv run`, already parsed by clap.
#[derive(Debug, Default)]
pub struct RunArgs {
    pub packages: Vec<String>,
    pub requirements: Option<String>,
    pub python: Option<String>,
    pub backend: Option<String>,
    pub uv: Option<String>,
    pub no_pip: bool,
    pub keep: bool,
    pub verbose: bool,
    pub pip_options: Vec<String>,
    pub venv_options: Vec<String>,
    pub args: Vec<String>,
}

/// Layer CLI flags over the `TEMPVENV_*` defaults.
pub fn build_options(mut base: VenvOptions, args: &RunArgs) -> Result<VenvOptions> {
    if let Some(ref python) = args.python {
        base.python_executable = Some(PathBuf::from(python));
    }
    if let Some(ref backend) = args.backend {
        base.backend = backend.parse::<Backend>()?;
    }
    if let Some(ref uv) = args.uv {
        base.uv_executable = Some(PathBuf::from(uv));
    }
    if let Some(ref req) = args.requirements {
        base.requirements_file = Some(PathBuf::from(req));
    }
    base.packages.extend(args.packages.iter().cloned());
    base.pip_options.extend(args.pip_options.iter().cloned());
    base.venv_options.extend(args.venv_options.iter().cloned());
    if args.no_pip {
        base.ensure_installer = false;
    }
    if args.keep {
        base.cleanup = false;
    }
    if args.verbose {
        base.verbose = true;
    }
    Ok(base)
}

/// Returns the exit code of the interpreter run inside the environment.
pub fn cmd_run(args: RunArgs) -> Result<i32> {
    let options = build_options(
        VenvOptions::from_env().context("Invalid TEMPVENV_* configuration")?,
        &args,
    )?;
    let keep = !options.cleanup;
    let mut venv = TempVenv::new(options);

    let status = venv
        .scope(|python| Command::new(python).args(&args.args).status())
        .context("Failed to set up temporary environment")?
        .context("Failed to launch environment interpreter")?;

    if keep {
        if let Some(root) = venv.root_directory() {
            eprintln!("Environment kept at {}", root.display());
        }
    }
    Ok(exit_code(status))
}

#[cfg(unix)]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .unwrap_or_else(|| 128 + status.signal().unwrap_or(0))
}

#[cfg(not(unix))]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
