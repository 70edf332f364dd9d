//! Synchronous external command execution with captured output.

use std::process::{Command, ExitStatus};

/// Captured result of one external invocation.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// stderr and stdout (non-empty parts only), for embedding into errors.
    pub fn diagnostics(&self) -> String {
        let parts: Vec<&str> = [self.stderr.trim(), self.stdout.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            format!("exited with {}", self.status)
        } else {
            parts.join("\n")
        }
    }
}

/// Run `cmd` to completion, blocking the calling thread.
pub fn run_captured(cmd: &mut Command) -> std::io::Result<CommandOutput> {
    let out = cmd.output()?;
    Ok(CommandOutput {
        status: out.status,
        stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
    })
}

/// Render a command line for progress output: program then arguments, space separated.
pub fn display_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
