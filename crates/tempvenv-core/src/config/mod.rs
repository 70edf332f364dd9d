//! Unified configuration layer.
//!
//! Every environment variable read goes through this module; the rest of the
//! workspace works with the structured configs.
//!
//! - `loader`: env_or, env_optional, env_bool, env_list, load_dotenv
//! - `schema`: ObservabilityConfig, VenvDefaults, ActiveEnvConfig
//! - `env_keys`: key constants and aliases

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{
    env_bool, env_list, env_optional, env_or, load_dotenv, read_dotenv, remove_env_var,
    set_env_var, ScopedEnvGuard,
};
pub use schema::{ActiveEnvConfig, ObservabilityConfig, VenvDefaults};
