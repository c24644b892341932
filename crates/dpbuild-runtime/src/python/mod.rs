//! Module resolution through the target Python interpreter.
//!
//! The interpreter is asked once per package through a short inline script
//! that prints a JSON report on stdout. Anything that goes wrong (no
//! interpreter, script failure, unexpected output) degrades to "not found".

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Mutex, OnceLock};

use dpbuild_core::ports::ModuleLocatorPort;
use dpbuild_core::{InterpreterInfo, Lookup};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Interpreter names tried on `PATH`, in order.
const INTERPRETER_CANDIDATES: [&str; 2] = ["python3", "python"];

/// Prints `{location, python_version, platform, stdlib_dir}` for `sys.argv[1]`.
const PROBE_SCRIPT: &str = r#"
import importlib.util, json, os, sys, sysconfig
name = sys.argv[1] if len(sys.argv) > 1 else ""
location = None
if name:
    try:
        spec = importlib.util.find_spec(name)
    except (ImportError, ValueError):
        spec = None
    if spec is not None and spec.submodule_search_locations:
        location = list(spec.submodule_search_locations)[0]
print(json.dumps({
    "location": location,
    "python_version": "%d.%d" % sys.version_info[:2],
    "platform": sysconfig.get_platform(),
    "stdlib_dir": os.path.dirname(os.path.__file__),
}))
"#;

#[derive(Debug, Error)]
enum ProbeError {
    #[error("failed to run {interpreter}: {source}")]
    Spawn {
        interpreter: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{interpreter} exited with {status}: {stderr}")]
    Failed {
        interpreter: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("malformed probe report: {0}")]
    Report(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct ProbeReport {
    location: Option<PathBuf>,
    python_version: String,
    platform: String,
    stdlib_dir: Option<PathBuf>,
}

impl From<ProbeReport> for InterpreterInfo {
    fn from(report: ProbeReport) -> Self {
        Self {
            python_version: report.python_version,
            platform: report.platform,
            stdlib_dir: report.stdlib_dir,
        }
    }
}

/// Find a Python 3 interpreter on `PATH`.
pub fn discover_interpreter() -> Option<PathBuf> {
    INTERPRETER_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
}

/// `ModuleLocatorPort` backed by a real interpreter.
///
/// Without an interpreter every lookup is `NotFound` and
/// `interpreter_info` is `None`.
pub struct PythonModuleLocator {
    interpreter: Option<PathBuf>,
    info: OnceLock<Option<InterpreterInfo>>,
    packages: Mutex<HashMap<String, Lookup>>,
}

impl PythonModuleLocator {
    /// Use `interpreter` if given, otherwise discover one on `PATH`.
    pub fn new(interpreter: Option<PathBuf>) -> Self {
        let interpreter = interpreter.or_else(discover_interpreter);
        match &interpreter {
            Some(path) => debug!(interpreter = %path.display(), "Using Python interpreter"),
            None => warn!("No Python interpreter found; framework lookups will fail"),
        }
        Self {
            interpreter,
            info: OnceLock::new(),
            packages: Mutex::new(HashMap::new()),
        }
    }

    /// A locator that never finds anything.
    pub fn unavailable() -> Self {
        Self {
            interpreter: None,
            info: OnceLock::new(),
            packages: Mutex::new(HashMap::new()),
        }
    }

    pub fn interpreter(&self) -> Option<&Path> {
        self.interpreter.as_deref()
    }

    fn run_probe(interpreter: &Path, package: &str) -> Result<ProbeReport, ProbeError> {
        let output = Command::new(interpreter)
            .arg("-c")
            .arg(PROBE_SCRIPT)
            .arg(package)
            .output()
            .map_err(|source| ProbeError::Spawn {
                interpreter: interpreter.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                interpreter: interpreter.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_report(&String::from_utf8_lossy(&output.stdout))
    }

    fn probe(&self, package: &str) -> Option<ProbeReport> {
        let interpreter = self.interpreter.as_deref()?;
        match Self::run_probe(interpreter, package) {
            Ok(report) => Some(report),
            Err(err) => {
                warn!(package = %package, error = %err, "Python probe failed");
                None
            }
        }
    }
}

/// Parse the last non-empty stdout line; site hooks may print before it.
fn parse_report(stdout: &str) -> Result<ProbeReport, ProbeError> {
    let line = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();
    Ok(serde_json::from_str(line)?)
}

impl ModuleLocatorPort for PythonModuleLocator {
    fn find_package(&self, name: &str) -> Lookup {
        if let Ok(cache) = self.packages.lock()
            && let Some(hit) = cache.get(name)
        {
            return hit.clone();
        }

        let report = self.probe(name);
        let lookup = Lookup::from(report.as_ref().and_then(|r| r.location.clone()));
        if let Some(report) = report {
            let _ = self.info.set(Some(report.into()));
        }
        if let Ok(mut cache) = self.packages.lock() {
            cache.insert(name.to_string(), lookup.clone());
        }
        lookup
    }

    fn interpreter_info(&self) -> Option<InterpreterInfo> {
        self.info
            .get_or_init(|| self.probe("").map(InterpreterInfo::from))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report() {
        let report = parse_report(
            r#"{"location": "/venv/lib/python3.8/site-packages/tensorflow", "python_version": "3.8", "platform": "linux-x86_64", "stdlib_dir": "/usr/lib/python3.8"}"#,
        )
        .unwrap();
        assert_eq!(
            report.location,
            Some(PathBuf::from("/venv/lib/python3.8/site-packages/tensorflow"))
        );
        let info = InterpreterInfo::from(report);
        assert_eq!(info.python_version, "3.8");
        assert_eq!(info.stdlib_dir, Some(PathBuf::from("/usr/lib/python3.8")));
    }

    #[test]
    fn test_parse_report_skips_noise() {
        let stdout = "sitecustomize loaded\n{\"location\": null, \"python_version\": \"3.11\", \"platform\": \"macosx-11.0-arm64\", \"stdlib_dir\": null}\n\n";
        let report = parse_report(stdout).unwrap();
        assert!(report.location.is_none());
        assert_eq!(report.platform, "macosx-11.0-arm64");
    }

    #[test]
    fn test_parse_report_rejects_garbage() {
        assert!(parse_report("Traceback (most recent call last):").is_err());
        assert!(parse_report("").is_err());
    }

    #[test]
    fn test_unavailable_locator() {
        let locator = PythonModuleLocator::unavailable();
        assert_eq!(locator.find_package("tensorflow"), Lookup::NotFound);
        assert!(locator.interpreter_info().is_none());
    }

    #[test]
    fn test_missing_interpreter_path() {
        let locator =
            PythonModuleLocator::new(Some(PathBuf::from("/nonexistent/bin/python-12345")));
        assert_eq!(locator.find_package("tensorflow"), Lookup::NotFound);
        assert!(locator.interpreter_info().is_none());
    }

    #[test]
    fn test_real_interpreter_reports_itself() {
        // Only meaningful where python is installed
        let locator = PythonModuleLocator::new(None);
        if locator.interpreter().is_some()
            && let Some(info) = locator.interpreter_info()
        {
            assert!(info.python_version.starts_with('3'), "{}", info.python_version);
            assert!(!info.platform.is_empty());
            assert_eq!(
                locator.find_package("definitely_not_a_real_package_12345"),
                Lookup::NotFound
            );
        }
    }
}
