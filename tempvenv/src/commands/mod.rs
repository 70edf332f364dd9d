//! CLI commands. Each one is a thin caller of `tempvenv_env`.

pub mod locate;
pub mod run;
