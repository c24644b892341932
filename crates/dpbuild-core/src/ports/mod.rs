//! Port definitions (trait abstractions) for external collaborators.
//!
//! The resolver reaches the process environment, the Python interpreter,
//! the filesystem and the build tool only through these traits.
//! Implementations live in `dpbuild-runtime`; tests substitute fakes.
//!
//! # Design Rules
//!
//! - Ports never fail with errors: "not found" is a value (`Lookup`,
//!   `ToolProbe`), except directory creation which reports the IO error
//!   so the caller can tell "already exists" apart
//! - No process spawning or path probing details in any signature

mod build_tool_probe;
mod directory_creator;
mod directory_finder;
mod environment;
mod module_locator;

pub use build_tool_probe::BuildToolProbePort;
pub use directory_creator::DirectoryCreatorPort;
pub use directory_finder::DirectoryFinderPort;
pub use environment::EnvironmentPort;
pub use module_locator::ModuleLocatorPort;

#[cfg(test)]
pub use build_tool_probe::MockBuildToolProbePort;
#[cfg(test)]
pub use directory_creator::MockDirectoryCreatorPort;
#[cfg(test)]
pub use directory_finder::MockDirectoryFinderPort;
#[cfg(test)]
pub use environment::MockEnvironmentPort;
#[cfg(test)]
pub use module_locator::MockModuleLocatorPort;
