//! Build tool version probing.

use crate::domain::ToolProbe;

/// Port for asking the locally installed build tool for its version.
#[cfg_attr(test, mockall::automock)]
pub trait BuildToolProbePort: Send + Sync {
    fn probe_version(&self) -> ToolProbe;
}
