//! Environment variable keys and their aliases.
//!
//! Primary keys use the `TEMPVENV_*` prefix; alias slices are consulted in order
//! when the primary key is unset.

/// Session defaults
pub mod venv {
    /// Base interpreter used when the caller does not pass one explicitly.
    pub const TEMPVENV_PYTHON: &str = "TEMPVENV_PYTHON";
    pub const PYTHON_ALIASES: &[&str] = &["TEMPVENV_PYTHON_EXECUTABLE"];

    /// Environment-creation backend: "venv" (default) or "uv".
    pub const TEMPVENV_BACKEND: &str = "TEMPVENV_BACKEND";

    /// `uv` executable for the uv backend (default: `uv` on PATH, then `python -m uv`).
    pub const TEMPVENV_UV: &str = "TEMPVENV_UV";

    /// Keep the root directory after a successful session.
    pub const TEMPVENV_KEEP: &str = "TEMPVENV_KEEP";

    /// Emit progress lines for every session.
    pub const TEMPVENV_VERBOSE: &str = "TEMPVENV_VERBOSE";

    /// Whitespace-separated options appended to every installer invocation.
    pub const TEMPVENV_PIP_OPTIONS: &str = "TEMPVENV_PIP_OPTIONS";

    /// Whitespace-separated options appended to every environment creation.
    pub const TEMPVENV_VENV_OPTIONS: &str = "TEMPVENV_VENV_OPTIONS";
}

/// Observability and logging
pub mod observability {
    pub const TEMPVENV_QUIET: &str = "TEMPVENV_QUIET";

    pub const TEMPVENV_LOG_LEVEL: &str = "TEMPVENV_LOG_LEVEL";

    pub const TEMPVENV_LOG_JSON: &str = "TEMPVENV_LOG_JSON";
}

/// Active-environment markers probed when locating the base interpreter.
pub mod active_env {
    pub const VIRTUAL_ENV: &str = "VIRTUAL_ENV";
    pub const CONDA_PREFIX: &str = "CONDA_PREFIX";
}
