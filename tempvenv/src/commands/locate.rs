//! `tempvenv locate`: run only the interpreter locator.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use tempvenv_core::config::VenvDefaults;
use tempvenv_env::InterpreterSearch;

#[derive(Debug, Serialize)]
pub struct LocateReport {
    pub python: String,
    /// "explicit" when validated from --python / TEMPVENV_PYTHON, else "probed".
    pub source: &'static str,
}

pub fn locate_report(search: &InterpreterSearch, explicit: Option<&Path>) -> Result<LocateReport> {
    let python = search.locate(explicit)?;
    Ok(LocateReport {
        python: python.display().to_string(),
        source: if explicit.is_some() { "explicit" } else { "probed" },
    })
}

pub fn cmd_locate(python: Option<String>, json: bool) -> Result<()> {
    let explicit = python
        .or_else(|| VenvDefaults::from_env().python)
        .map(PathBuf::from);
    let report = locate_report(&InterpreterSearch::from_env(), explicit.as_deref())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.python);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_search() -> InterpreterSearch {
        InterpreterSearch {
            active_prefixes: Vec::new(),
            names: vec!["python-not-here".into()],
            search_path: Some(std::env::temp_dir().join("tempvenv-no-such-dir").into_os_string()),
        }
    }

    #[test]
    fn test_locate_report_errors_when_nothing_found() {
        let err = locate_report(&empty_search(), None).unwrap_err();
        assert!(err.to_string().contains("python-not-here"));
    }

    #[cfg(unix)]
    #[test]
    fn test_locate_report_json_shape() {
        let exe = std::path::Path::new("/bin/sh");
        let report = locate_report(&empty_search(), Some(exe)).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["python"], "/bin/sh");
        assert_eq!(value["source"], "explicit");
    }
}
