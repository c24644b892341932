//! Directory creation.

use std::io;
use std::path::Path;

/// Port for creating a single directory.
#[cfg_attr(test, mockall::automock)]
pub trait DirectoryCreatorPort: Send + Sync {
    /// Create `path` and any missing parents.
    ///
    /// Must fail with `io::ErrorKind::AlreadyExists` when `path` already
    /// exists, so callers can distinguish a fresh directory from a kept one.
    fn create_dir(&self, path: &Path) -> io::Result<()>;
}
