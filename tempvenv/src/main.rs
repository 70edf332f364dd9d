mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tempvenv_core::observability::{self, TracingMode};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = matches!(cli.command, Commands::Run { verbose: true, .. });
    observability::init_tracing(if verbose {
        TracingMode::Verbose
    } else {
        TracingMode::Default
    });

    match cli.command {
        Commands::Run {
            packages,
            requirements,
            python,
            backend,
            uv,
            no_pip,
            keep,
            verbose,
            pip_options,
            venv_options,
            args,
        } => {
            let code = commands::run::cmd_run(commands::run::RunArgs {
                packages,
                requirements,
                python,
                backend,
                uv,
                no_pip,
                keep,
                verbose,
                pip_options,
                venv_options,
                args,
            })?;
            std::process::exit(code);
        }
        Commands::Locate { python, json } => {
            commands::locate::cmd_locate(python, json)?;
        }
    }
    Ok(())
}
