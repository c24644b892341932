//! Where the framework's native files live, or would live.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Resolved install directory of the framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "path", rename_all = "snake_case")]
pub enum InstallLocation {
    /// Found through the interpreter's module resolution.
    Module(PathBuf),
    /// Found by scanning the interpreter's secondary site-packages directory.
    SitePackages(PathBuf),
    /// Not installed. This is where an on-demand setup install would put it;
    /// the directory does not exist yet.
    Placeholder(PathBuf),
}

impl InstallLocation {
    pub fn path(&self) -> &Path {
        match self {
            Self::Module(path) | Self::SitePackages(path) | Self::Placeholder(path) => path,
        }
    }

    /// True when the path was synthesized rather than found on disk.
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    pub const fn source_name(&self) -> &'static str {
        match self {
            Self::Module(_) => "module resolution",
            Self::SitePackages(_) => "site-packages scan",
            Self::Placeholder(_) => "placeholder",
        }
    }
}

/// Egg directory name of a distribution, as produced by an isolated
/// setup-time install: `<project>-<version>-py<X.Y>[-<platform>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EggName {
    pub project: String,
    pub version: String,
    pub python_version: String,
    pub platform: Option<String>,
}

impl fmt::Display for EggName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-py{}",
            to_filename(&safe_name(&self.project)),
            to_filename(&safe_name(&self.version)),
            self.python_version
        )?;
        if let Some(platform) = &self.platform {
            write!(f, "-{platform}")?;
        }
        Ok(())
    }
}

/// Collapse each run of characters other than ASCII alphanumerics and `.`
/// into a single `-`.
fn safe_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '.' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('-');
            in_run = true;
        }
    }
    out
}

fn to_filename(name: &str) -> String {
    name.replace('-', "_")
}

/// Platform tag for the host this binary runs on, used when no interpreter
/// can report one.
///
/// `macos_deployment_target` is the `MACOSX_DEPLOYMENT_TARGET` value, if set.
pub fn host_platform_tag(macos_deployment_target: Option<&str>) -> String {
    platform_tag_for(
        std::env::consts::OS,
        std::env::consts::ARCH,
        macos_deployment_target,
    )
}

fn platform_tag_for(os: &str, arch: &str, macos_deployment_target: Option<&str>) -> String {
    match os {
        "windows" => match arch {
            "x86_64" => "win-amd64".to_string(),
            "x86" => "win32".to_string(),
            "aarch64" => "win-arm64".to_string(),
            other => format!("win-{other}"),
        },
        "macos" => {
            let target = macos_deployment_target
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or("11.0");
            let arch = if arch == "aarch64" { "arm64" } else { arch };
            format!("macosx-{target}-{arch}")
        }
        other => format!("{other}-{arch}"),
    }
}
