//! Core domain types, port definitions and the dependency resolver for dpbuild.
//!
//! `dpbuild` decides, once per build-configuration pass, which numerical
//! framework version a native package builds against, where that
//! framework's native files live, and whether the build tool has to be
//! fetched first. This crate holds the pure part of that decision; the
//! probing adapters live in `dpbuild-runtime`.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    BuildConfig, BuildPlan, BuildToolStatus, Comparator, EggName, FrameworkVariants,
    InstallLocation, InterpreterInfo, Lookup, PackageNaming, ToolProbe, Version, VersionError,
    VersionSpec,
};
pub use ports::{
    BuildToolProbePort, DirectoryCreatorPort, DirectoryFinderPort, EnvironmentPort,
    ModuleLocatorPort,
};
pub use services::{DependencyResolver, OutputDirStatus, Resolution, ResolveError, ResolverDeps};
pub use settings::{
    DEFAULT_FRAMEWORK_VERSION, DEFAULT_MIN_BUILD_TOOL_VERSION, DEFAULT_VERSION_ENV_VAR,
    FloatPrecision, ResolverSettings, SettingsError, validate_settings,
};
