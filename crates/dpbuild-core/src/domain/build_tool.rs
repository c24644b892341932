//! Build tool sufficiency.

use serde::Serialize;

use super::lookup::ToolProbe;
use super::version::Version;

/// Whether the locally available build tool can be used as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BuildToolStatus {
    /// Installed at or above the minimum.
    Sufficient { version: String },
    /// Installed but older than the minimum.
    Outdated { version: String, minimum: String },
    /// Installed but reported something without a leading version number.
    Unparseable { raw: String },
    /// Not installed.
    Missing,
}

impl BuildToolStatus {
    /// Compare a probe result against `minimum`.
    ///
    /// Development builds carry suffixes outside the release grammar
    /// (`3.28.1-dirty`); those are compared on their numeric release only.
    pub fn assess(probe: ToolProbe, minimum: &Version) -> Self {
        let ToolProbe::Found { version } = probe else {
            return Self::Missing;
        };
        let found = Version::parse(&version)
            .ok()
            .or_else(|| Version::leading_release(&version));
        match found {
            Some(found) if found < *minimum => Self::Outdated {
                version,
                minimum: minimum.to_string(),
            },
            Some(_) => Self::Sufficient { version },
            None => Self::Unparseable { raw: version },
        }
    }

    /// True when the build tool has to be fetched as a setup-time requirement.
    pub const fn requires_install(&self) -> bool {
        !matches!(self, Self::Sufficient { .. })
    }
}
