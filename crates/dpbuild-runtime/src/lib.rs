//! Probing adapters for dpbuild.
//!
//! Implements the `dpbuild-core` ports against the real process
//! environment, a Python interpreter, the filesystem and CMake, and wires
//! them into `ResolverDeps` for the composition root.
#![deny(unsafe_code)]

mod env;
pub mod fs;
pub mod python;
pub mod system;

use std::path::PathBuf;
use std::sync::Arc;

use dpbuild_core::ResolverDeps;

pub use env::ProcessEnvironment;
pub use fs::{FsDirectoryCreator, SitePackagesFinder};
pub use python::{PythonModuleLocator, discover_interpreter};
pub use system::CmakeProbe;

/// Executables to probe instead of the ones found on `PATH`.
#[derive(Debug, Clone, Default)]
pub struct ProbeOptions {
    pub python: Option<PathBuf>,
    pub cmake: Option<PathBuf>,
}

/// Real adapters for every resolver port.
pub fn default_resolver_deps(options: &ProbeOptions) -> ResolverDeps {
    let cmake = options
        .cmake
        .clone()
        .map_or_else(CmakeProbe::new, CmakeProbe::with_executable);

    ResolverDeps {
        env: Arc::new(ProcessEnvironment),
        modules: Arc::new(PythonModuleLocator::new(options.python.clone())),
        finder: Arc::new(SitePackagesFinder),
        build_tool: Arc::new(cmake),
        dirs: Arc::new(FsDirectoryCreator),
    }
}
