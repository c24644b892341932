//! Directory creation.

use std::fs;
use std::io;
use std::path::Path;

use dpbuild_core::ports::DirectoryCreatorPort;

/// `DirectoryCreatorPort` on the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectoryCreator;

impl FsDirectoryCreator {
    pub const fn new() -> Self {
        Self
    }
}

impl DirectoryCreatorPort for FsDirectoryCreator {
    fn create_dir(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        // Not create_dir_all: an existing directory must report AlreadyExists.
        fs::create_dir(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_creates_with_parents() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a/b/deepmd");
        FsDirectoryCreator.create_dir(&target).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn test_existing_directory_reports_already_exists() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("deepmd");
        FsDirectoryCreator.create_dir(&target).unwrap();

        let err = FsDirectoryCreator.create_dir(&target).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }
}
