//! Results returned by locator and probe ports.

use std::path::PathBuf;

use serde::Serialize;

/// Outcome of looking a package up in one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum Lookup {
    Found(PathBuf),
    NotFound,
}

impl Lookup {
    pub fn into_option(self) -> Option<PathBuf> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound => None,
        }
    }

    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl From<Option<PathBuf>> for Lookup {
    fn from(value: Option<PathBuf>) -> Self {
        value.map_or(Self::NotFound, Self::Found)
    }
}

/// Outcome of asking the build tool for its version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolProbe {
    /// The tool ran and reported this version text.
    Found { version: String },
    /// The tool is not installed or could not be run.
    NotFound,
}

/// What the running Python interpreter reports about itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpreterInfo {
    /// `major.minor`, e.g. `3.8`.
    pub python_version: String,
    /// Platform tag, e.g. `linux-x86_64`.
    pub platform: String,
    /// Directory holding the standard library (`os.path`'s parent).
    pub stdlib_dir: Option<PathBuf>,
}
