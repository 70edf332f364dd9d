use clap::{Parser, Subcommand};

/// tempvenv - run Python inside a throwaway virtual environment
#[derive(Parser, Debug)]
#[command(name = "tempvenv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a temporary environment, run its interpreter with ARGS, then tear it down
    Run {
        /// Package specifier to install (repeatable)
        #[arg(short = 'p', long = "package", value_name = "SPEC")]
        packages: Vec<String>,

        /// Requirements file (one specifier per line; missing file is ignored)
        #[arg(short = 'r', long = "requirements", value_name = "FILE")]
        requirements: Option<String>,

        /// Base interpreter (default: TEMPVENV_PYTHON, active env, then PATH)
        #[arg(long, value_name = "PYTHON")]
        python: Option<String>,

        /// Environment backend: venv or uv (default: TEMPVENV_BACKEND or venv)
        #[arg(long, value_name = "BACKEND")]
        backend: Option<String>,

        /// uv executable for the uv backend (default: TEMPVENV_UV, PATH, then `python -m uv`)
        #[arg(long, value_name = "UV")]
        uv: Option<String>,

        /// Create the environment without pip; requested packages are skipped
        #[arg(long, default_value = "false")]
        no_pip: bool,

        /// Keep the environment directory after exit
        #[arg(long, default_value = "false")]
        keep: bool,

        /// Print progress for every lifecycle step
        #[arg(short, long, default_value = "false")]
        verbose: bool,

        /// Option passed verbatim to the installer (repeatable)
        #[arg(long = "pip-option", value_name = "OPT", allow_hyphen_values = true)]
        pip_options: Vec<String>,

        /// Option passed verbatim to environment creation (repeatable)
        #[arg(long = "venv-option", value_name = "OPT", allow_hyphen_values = true)]
        venv_options: Vec<String>,

        /// Arguments for the environment's interpreter (after `--`)
        #[arg(last = true, value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Print the base interpreter a new environment would be created from
    Locate {
        /// Validate this interpreter instead of probing
        #[arg(long, value_name = "PYTHON")]
        python: Option<String>,

        /// Output as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },
}
