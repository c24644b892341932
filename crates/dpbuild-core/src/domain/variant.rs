//! CPU/GPU distribution naming for the framework.
//!
//! The framework renamed its distributions across releases. Old releases
//! (and the 2.0 line) ship the CPU build as the plain name and the GPU build
//! with a `-gpu` suffix; newer releases ship the GPU-capable build as the
//! plain name and a separate `-cpu` distribution.

use serde::Serialize;

use super::version::{Version, VersionSpec};

/// Which naming convention applies to a requested version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageNaming {
    /// `<name>` for CPU, `<name>-gpu` for GPU.
    Legacy,
    /// `<name>-cpu` for CPU, `<name>` for GPU.
    Modern,
}

impl PackageNaming {
    /// Choose the naming for `version`.
    ///
    /// Legacy applies below 1.15 and within `[2.0, 2.1)`.
    pub fn for_version(version: &Version) -> Self {
        let first_modern = Version::from_release(&[1, 15]);
        let excluded_start = Version::from_release(&[2, 0]);
        let excluded_end = Version::from_release(&[2, 1]);

        if *version < first_modern || (excluded_start <= *version && *version < excluded_end) {
            Self::Legacy
        } else {
            Self::Modern
        }
    }

    /// Distribution name of the CPU-only build.
    pub fn cpu_package(self, base: &str) -> String {
        match self {
            Self::Legacy => base.to_string(),
            Self::Modern => format!("{base}-cpu"),
        }
    }

    /// Distribution name of the GPU-enabled build.
    pub fn gpu_package(self, base: &str) -> String {
        match self {
            Self::Legacy => format!("{base}-gpu"),
            Self::Modern => base.to_string(),
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Legacy => "legacy (-gpu suffix)",
            Self::Modern => "modern (-cpu suffix)",
        }
    }
}

/// Both install targets for a requested version.
///
/// Neither is chosen over the other; the packaging step offers both as
/// optional extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameworkVariants {
    pub naming: PackageNaming,
    /// Requirement string for the CPU extra, e.g. `tensorflow-cpu==2.3`.
    pub cpu: String,
    /// Requirement string for the GPU extra, e.g. `tensorflow==2.3`.
    pub gpu: String,
}

impl FrameworkVariants {
    pub fn select(base_package: &str, spec: &VersionSpec) -> Self {
        let naming = PackageNaming::for_version(&spec.version);
        Self {
            naming,
            cpu: spec.requirement(&naming.cpu_package(base_package)),
            gpu: spec.requirement(&naming.gpu_package(base_package)),
        }
    }
}
