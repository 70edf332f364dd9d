//! Config structs grouped by concern, loaded from the environment.

use super::env_keys::{observability as obv_keys, venv as venv_keys};
use super::loader::{env_bool, env_list, env_optional, env_or};

/// Observability: quiet mode, log level, JSON output.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            super::loader::load_dotenv();
            Self {
                quiet: env_bool(obv_keys::TEMPVENV_QUIET, &[], false),
                log_level: env_or(obv_keys::TEMPVENV_LOG_LEVEL, &[], || {
                    "tempvenv=info".to_string()
                }),
                log_json: env_bool(obv_keys::TEMPVENV_LOG_JSON, &[], false),
            }
        })
    }
}

/// Session defaults applied before any explicit option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenvDefaults {
    /// Default base interpreter (path or bare name).
    pub python: Option<String>,
    /// Backend name, parsed by the environment crate.
    pub backend: Option<String>,
    pub uv: Option<String>,
    pub keep: bool,
    pub verbose: bool,
    pub pip_options: Vec<String>,
    pub venv_options: Vec<String>,
}

impl VenvDefaults {
    /// Load from the environment (reads `.env` once).
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            python: env_optional(venv_keys::TEMPVENV_PYTHON, venv_keys::PYTHON_ALIASES),
            backend: env_optional(venv_keys::TEMPVENV_BACKEND, &[]),
            uv: env_optional(venv_keys::TEMPVENV_UV, &[]),
            keep: env_bool(venv_keys::TEMPVENV_KEEP, &[], false),
            verbose: env_bool(venv_keys::TEMPVENV_VERBOSE, &[], false),
            pip_options: env_list(venv_keys::TEMPVENV_PIP_OPTIONS, &[]),
            venv_options: env_list(venv_keys::TEMPVENV_VENV_OPTIONS, &[]),
        }
    }
}

/// Active environment prefixes (`$VIRTUAL_ENV`, then `$CONDA_PREFIX`).
#[derive(Debug, Clone, Default)]
pub struct ActiveEnvConfig;

impl ActiveEnvConfig {
    pub fn prefixes() -> Vec<String> {
        use super::env_keys::active_env;
        [active_env::VIRTUAL_ENV, active_env::CONDA_PREFIX]
            .iter()
            .filter_map(|key| env_optional(key, &[]))
            .collect()
    }
}
