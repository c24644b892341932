//! Package lookup inside a single directory.
//!
//! Mirrors the precedence of a path-entry file finder: a regular package
//! directory wins, then a plain module file, then a namespace directory.
//! Only packages have a search location, so a module file shadowing the
//! name counts as not found.

use std::fs;
use std::path::{Path, PathBuf};

use dpbuild_core::Lookup;
use dpbuild_core::ports::DirectoryFinderPort;
use tracing::debug;

/// Suffixes of importable single-file modules.
const MODULE_SUFFIXES: [&str; 4] = [".py", ".pyc", ".so", ".pyd"];

/// Pure-filesystem `DirectoryFinderPort`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SitePackagesFinder;

impl SitePackagesFinder {
    pub const fn new() -> Self {
        Self
    }
}

fn is_regular_package(dir: &Path) -> bool {
    ["__init__.py", "__init__.pyc"]
        .iter()
        .any(|init| dir.join(init).is_file())
}

/// True when `dir` holds a module file for `name`, including extension
/// modules with an ABI tag (`name.cpython-38-x86_64-linux-gnu.so`).
fn has_module_file(dir: &Path, name: &str) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    entries.flatten().any(|entry| {
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        let Some(rest) = file_name.strip_prefix(name) else {
            return false;
        };
        let is_file = entry.file_type().is_ok_and(|t| t.is_file());
        is_file
            && MODULE_SUFFIXES.iter().any(|suffix| {
                rest == *suffix || (rest.starts_with('.') && rest.ends_with(suffix))
            })
    })
}

impl DirectoryFinderPort for SitePackagesFinder {
    fn find_package_in(&self, dir: &Path, name: &str) -> Lookup {
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "Search directory does not exist");
            return Lookup::NotFound;
        }

        let candidate: PathBuf = dir.join(name);
        if candidate.is_dir() && is_regular_package(&candidate) {
            return Lookup::Found(candidate);
        }

        if has_module_file(dir, name) {
            debug!(dir = %dir.display(), name = %name, "Found a module file, not a package");
            return Lookup::NotFound;
        }

        if candidate.is_dir() {
            debug!(path = %candidate.display(), "Treating directory as a namespace package");
            return Lookup::Found(candidate);
        }

        Lookup::NotFound
    }
}
