//! The resolved build configuration.

use serde::Serialize;

use super::build_tool::BuildToolStatus;
use super::install::InstallLocation;
use super::variant::FrameworkVariants;
use super::version::VersionSpec;

/// Decisions made once per build-configuration pass.
///
/// Built by `DependencyResolver::resolve` and consumed immediately by the
/// packaging step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
    /// Requested framework version.
    pub framework_version: VersionSpec,
    /// CPU and GPU install targets for that version.
    pub variants: FrameworkVariants,
    /// Where the framework's native files are (or will be).
    pub install_location: InstallLocation,
    /// Framework requirement to fetch before the native build, set only when
    /// the framework was not found.
    pub framework_setup_requirement: Option<String>,
    /// Local build tool assessment.
    pub build_tool: BuildToolStatus,
}

impl BuildConfig {
    /// Whether the build tool must be added as a setup-time requirement.
    pub const fn build_tool_required(&self) -> bool {
        self.build_tool.requires_install()
    }
}
