//! Lower-level package lookup inside a single directory.

use std::path::Path;

use crate::domain::Lookup;

/// Port for finding a package directly inside `dir`, without consulting the
/// interpreter's import path.
#[cfg_attr(test, mockall::automock)]
pub trait DirectoryFinderPort: Send + Sync {
    fn find_package_in(&self, dir: &Path, name: &str) -> Lookup;
}
