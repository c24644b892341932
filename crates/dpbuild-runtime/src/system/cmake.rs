//! CMake version probe.

use std::path::PathBuf;

use dpbuild_core::ports::BuildToolProbePort;
use dpbuild_core::ToolProbe;
use tracing::{debug, warn};

use super::commands::{get_command_version, parse_cmake_version};

/// Probes a CMake executable with `--version`.
#[derive(Debug, Clone)]
pub struct CmakeProbe {
    executable: PathBuf,
}

impl CmakeProbe {
    /// Probe the `cmake` found on `PATH`.
    pub fn new() -> Self {
        Self::with_executable("cmake")
    }

    /// Probe a specific executable.
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &std::path::Path {
        &self.executable
    }
}

impl Default for CmakeProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildToolProbePort for CmakeProbe {
    fn probe_version(&self) -> ToolProbe {
        let cmd = self.executable.to_string_lossy();
        let Some(line) = get_command_version(&cmd, "--version") else {
            return ToolProbe::NotFound;
        };

        match parse_cmake_version(&line) {
            Some(version) => {
                debug!(executable = %cmd, version = %version, "Probed cmake");
                ToolProbe::Found { version }
            }
            None => {
                // Ran fine but printed something unexpected; let the
                // resolver treat the raw line as an unparseable version.
                warn!(executable = %cmd, output = %line, "Unexpected cmake --version output");
                ToolProbe::Found { version: line }
            }
        }
    }
}
