//! Resolver settings and validation.
//!
//! These are pure configuration types. Defaults reproduce the stock build of
//! the package; a JSON file can override any subset of fields.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Version, VersionError, VersionSpec};

/// Environment variable that overrides the requested framework version.
pub const DEFAULT_VERSION_ENV_VAR: &str = "TENSORFLOW_VERSION";

/// Framework version used when the environment does not request one.
pub const DEFAULT_FRAMEWORK_VERSION: &str = "2.3";

/// Oldest build tool release the native build accepts.
pub const DEFAULT_MIN_BUILD_TOOL_VERSION: &str = "3.7";

/// Errors from loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid version in '{field}': {source}")]
    InvalidVersion {
        field: &'static str,
        #[source]
        source: VersionError,
    },
}

/// Floating point precision of the native kernels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatPrecision {
    #[default]
    High,
    Low,
}

impl FloatPrecision {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

/// Everything the resolver needs besides the probed environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Directory containing the package being built.
    pub project_root: PathBuf,

    /// Import and distribution name of the framework.
    pub framework_package: String,

    /// Environment variable holding the requested framework version.
    pub version_env_var: String,

    /// Version requested when the environment variable is unset.
    pub default_framework_version: String,

    /// Name of the build tool, also used as its setup requirement.
    pub build_tool: String,

    /// Minimum acceptable build tool version.
    pub min_build_tool_version: String,

    /// Package output directory, relative to `project_root`.
    pub output_dir: PathBuf,

    pub float_precision: FloatPrecision,

    /// Build the Python interface of the native library.
    pub build_python_interface: bool,

    /// Build the C++ interface of the native library.
    pub build_cpp_interface: bool,

    /// Setup requirements that are always present.
    pub base_setup_requires: Vec<String>,

    /// Runtime requirements of the package.
    pub install_requires: Vec<String>,

    /// Optional extras besides the framework's cpu/gpu pair.
    pub extras_require: BTreeMap<String, Vec<String>>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ResolverSettings {
    /// Settings for the stock build.
    pub fn with_defaults() -> Self {
        let strings = |items: &[&str]| items.iter().map(ToString::to_string).collect::<Vec<_>>();

        let mut extras_require = BTreeMap::new();
        extras_require.insert("test".to_string(), strings(&["dpdata>=0.1.9"]));
        extras_require.insert(
            "docs".to_string(),
            strings(&["sphinx", "recommonmark", "sphinx_rtd_theme"]),
        );

        Self {
            project_root: PathBuf::from("."),
            framework_package: "tensorflow".to_string(),
            version_env_var: DEFAULT_VERSION_ENV_VAR.to_string(),
            default_framework_version: DEFAULT_FRAMEWORK_VERSION.to_string(),
            build_tool: "cmake".to_string(),
            min_build_tool_version: DEFAULT_MIN_BUILD_TOOL_VERSION.to_string(),
            output_dir: PathBuf::from("deepmd"),
            float_precision: FloatPrecision::High,
            build_python_interface: true,
            build_cpp_interface: true,
            base_setup_requires: strings(&["setuptools_scm", "scikit-build"]),
            install_requires: strings(&["numpy>=1.19", "scipy>=1.5", "pyyaml", "dargs"]),
            extras_require,
        }
    }

    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Absolute-or-relative path of the package output directory.
    pub fn output_dir_path(&self) -> PathBuf {
        self.project_root.join(&self.output_dir)
    }

    /// Parsed minimum build tool version.
    pub fn min_build_tool(&self) -> Result<Version, SettingsError> {
        Version::parse(&self.min_build_tool_version).map_err(|source| {
            SettingsError::InvalidVersion {
                field: "min_build_tool_version",
                source,
            }
        })
    }
}

/// Validate settings before handing them to the resolver.
pub fn validate_settings(settings: &ResolverSettings) -> Result<(), SettingsError> {
    let non_blank = [
        ("framework_package", &settings.framework_package),
        ("version_env_var", &settings.version_env_var),
        ("build_tool", &settings.build_tool),
    ];
    for (field, value) in non_blank {
        if value.trim().is_empty() {
            return Err(SettingsError::InvalidField {
                field,
                reason: "must not be empty".to_string(),
            });
        }
    }

    if settings.output_dir.as_os_str().is_empty() {
        return Err(SettingsError::InvalidField {
            field: "output_dir",
            reason: "must not be empty".to_string(),
        });
    }

    let default_spec = VersionSpec::parse(&settings.default_framework_version).map_err(
        |source| SettingsError::InvalidVersion {
            field: "default_framework_version",
            source,
        },
    )?;
    if !default_spec.comparator.admits_named_version() {
        return Err(SettingsError::InvalidField {
            field: "default_framework_version",
            reason: format!("'{}' excludes the version it names", default_spec.comparator),
        });
    }
    settings.min_build_tool()?;

    for name in ["cpu", "gpu"] {
        if settings.extras_require.contains_key(name) {
            tracing::warn!(
                extra = name,
                "configured extra is replaced by the framework variant"
            );
        }
    }

    Ok(())
}
