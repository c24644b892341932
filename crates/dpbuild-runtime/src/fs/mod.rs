//! Filesystem adapters.

mod dirs;
mod finder;

pub use dirs::FsDirectoryCreator;
pub use finder::SitePackagesFinder;
