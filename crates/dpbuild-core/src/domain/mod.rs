//! Domain types for build-environment resolution.
//!
//! Pure data and decision logic. Nothing here touches the filesystem, the
//! process environment or external tools; those sit behind `crate::ports`.

mod build_config;
mod build_tool;
mod install;
mod lookup;
mod plan;
mod variant;
mod version;

pub use build_config::BuildConfig;
pub use build_tool::BuildToolStatus;
pub use install::{EggName, InstallLocation, host_platform_tag};
pub use lookup::{InterpreterInfo, Lookup, ToolProbe};
pub use plan::BuildPlan;
pub use variant::{FrameworkVariants, PackageNaming};
pub use version::{Comparator, PreRelease, PreReleaseKind, Version, VersionError, VersionSpec};
