//! Environment variable loading with alias fallback chains.
//!
//! Keeps the `or_else` chains in one place so callers never read `std::env` directly.

use std::env;
use std::path::Path;

/// Load `.env` from the current directory into the process environment.
///
/// Runs once per process. Variables that are already set are never overridden.
pub fn load_dotenv() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let path = env::current_dir()
            .map(|d| d.join(".env"))
            .unwrap_or_else(|_| std::path::PathBuf::from(".env"));
        for (key, value) in read_dotenv(&path) {
            if env::var(&key).is_err() {
                set_env_var(&key, &value);
            }
        }
    });
}

/// Parse a `.env` file into key/value pairs. Missing or unreadable files yield nothing.
pub fn read_dotenv(path: &Path) -> Vec<(String, String)> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content.lines().filter_map(parse_dotenv_line).collect()
}

fn parse_dotenv_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let mut value = value.trim();
    // Strip inline comment (# not inside quotes)
    if let Some(hash_pos) = value.find('#') {
        let before_hash = value[..hash_pos].trim_end();
        if !before_hash.contains('"') && !before_hash.contains('\'') {
            value = before_hash;
        }
    }
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        value = &value[1..value.len() - 1];
    }
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

fn lookup(primary: &str, aliases: &[&str]) -> Option<String> {
    env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()))
}

/// Read the primary key or its aliases, falling back to `default` when unset or empty.
pub fn env_or<F>(primary: &str, aliases: &[&str], default: F) -> String
where
    F: FnOnce() -> String,
{
    lookup(primary, aliases)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default)
}

/// Read the primary key or its aliases; empty values count as unset.
pub fn env_optional(primary: &str, aliases: &[&str]) -> Option<String> {
    lookup(primary, aliases).and_then(|s| {
        let s = s.trim().to_string();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    })
}

/// Parse a boolean variable: 0/false/no/off are false, any other value is true.
pub fn env_bool(primary: &str, aliases: &[&str], default: bool) -> bool {
    match lookup(primary, aliases).as_deref() {
        Some(s) => parse_bool(s),
        None => default,
    }
}

fn parse_bool(s: &str) -> bool {
    !matches!(
        s.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

/// Read a whitespace-separated list. Unset yields an empty list.
pub fn env_list(primary: &str, aliases: &[&str]) -> Vec<String> {
    env_optional(primary, aliases)
        .map(|s| s.split_whitespace().map(String::from).collect())
        .unwrap_or_default()
}

// All `std::env::set_var` / `remove_var` calls go through these wrappers.
// Callers must invoke them before spawning threads.

/// Set a single environment variable.
#[allow(unsafe_code)]
pub fn set_env_var(key: &str, value: &str) {
    unsafe { env::set_var(key, value) };
}

/// Remove a single environment variable.
#[allow(unsafe_code)]
pub fn remove_env_var(key: &str) {
    unsafe { env::remove_var(key) };
}

/// RAII guard that removes the named variable on drop.
pub struct ScopedEnvGuard(pub &'static str);

impl Drop for ScopedEnvGuard {
    fn drop(&mut self) {
        remove_env_var(self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotenv_line_variants() {
        assert_eq!(
            parse_dotenv_line("TEMPVENV_BACKEND=uv"),
            Some(("TEMPVENV_BACKEND".into(), "uv".into()))
        );
        assert_eq!(
            parse_dotenv_line("export TEMPVENV_KEEP = \"1\""),
            Some(("TEMPVENV_KEEP".into(), "1".into()))
        );
        assert_eq!(
            parse_dotenv_line("TEMPVENV_PYTHON=/usr/bin/python3 # pinned"),
            Some(("TEMPVENV_PYTHON".into(), "/usr/bin/python3".into()))
        );
        assert_eq!(parse_dotenv_line("# comment"), None);
        assert_eq!(parse_dotenv_line("   "), None);
        assert_eq!(parse_dotenv_line("=value"), None);
        assert_eq!(parse_dotenv_line("NO_EQUALS"), None);
    }

    #[test]
    fn test_read_dotenv_missing_file_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(read_dotenv(&tmp.path().join(".env")).is_empty());
    }

    #[test]
    fn test_read_dotenv_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".env");
        std::fs::write(&path, "A=1\n\n# skip\nB='two words'\n").unwrap();
        let pairs = read_dotenv(&path);
        assert_eq!(
            pairs,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "two words".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_bool() {
        for falsy in ["0", "false", "FALSE", " no ", "off"] {
            assert!(!parse_bool(falsy), "{falsy:?}");
        }
        for truthy in ["1", "true", "yes", "anything"] {
            assert!(parse_bool(truthy), "{truthy:?}");
        }
    }

    #[test]
    fn test_env_alias_chain() {
        const PRIMARY: &str = "TEMPVENV_TEST_LOADER_PRIMARY";
        const ALIAS: &str = "TEMPVENV_TEST_LOADER_ALIAS";
        let _g1 = ScopedEnvGuard(PRIMARY);
        let _g2 = ScopedEnvGuard(ALIAS);

        assert_eq!(env_optional(PRIMARY, &[ALIAS]), None);
        assert_eq!(env_or(PRIMARY, &[ALIAS], || "default".into()), "default");

        set_env_var(ALIAS, " --no-cache-dir  --quiet ");
        assert_eq!(
            env_list(PRIMARY, &[ALIAS]),
            vec!["--no-cache-dir".to_string(), "--quiet".to_string()]
        );

        set_env_var(PRIMARY, "0");
        assert!(!env_bool(PRIMARY, &[ALIAS], true));
    }
}
