//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where adapters are wired together for the
//! CLI: settings are loaded, the runtime probes are instantiated, and the
//! resolver is composed over them. Handlers receive the finished context.

use std::path::PathBuf;

use dpbuild_core::{DependencyResolver, ResolverDeps, ResolverSettings};
use dpbuild_runtime::{ProbeOptions, default_resolver_deps};
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Optional JSON settings file.
    pub settings_file: Option<PathBuf>,
    /// Overrides `project_root` from the settings.
    pub project_root: Option<PathBuf>,
    /// Executables to probe.
    pub probes: ProbeOptions,
}

impl CliConfig {
    /// Collect bootstrap options from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            settings_file: cli.config.clone(),
            project_root: cli.project_root.clone(),
            probes: ProbeOptions {
                python: cli.python.clone(),
                cmake: cli.cmake.clone(),
            },
        }
    }

    /// Effective settings: file (or defaults) plus overrides.
    pub fn load_settings(&self) -> Result<ResolverSettings, CliError> {
        let mut settings = match &self.settings_file {
            Some(path) => {
                debug!(path = %path.display(), "Loading settings file");
                ResolverSettings::from_json_file(path)?
            }
            None => ResolverSettings::with_defaults(),
        };
        if let Some(root) = &self.project_root {
            settings.project_root.clone_from(root);
        }
        Ok(settings)
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// The resolver over real adapters.
    pub resolver: DependencyResolver,
    /// The adapters themselves, for diagnostics that query them directly.
    pub deps: ResolverDeps,
}

/// Wire settings and runtime probes into a `CliContext`.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let settings = config.load_settings()?;
    let deps = default_resolver_deps(&config.probes);
    let resolver = DependencyResolver::new(settings, deps.clone())?;
    Ok(CliContext { resolver, deps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let settings = CliConfig::default().load_settings().unwrap();
        assert_eq!(settings, ResolverSettings::with_defaults());
    }

    #[test]
    fn test_project_root_override_beats_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"project_root": "/from/file", "output_dir": "out"}}"#).unwrap();

        let config = CliConfig {
            settings_file: Some(file.path().to_path_buf()),
            project_root: Some(PathBuf::from("/from/flag")),
            ..CliConfig::default()
        };
        let settings = config.load_settings().unwrap();
        assert_eq!(settings.project_root, PathBuf::from("/from/flag"));
        assert_eq!(settings.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_missing_settings_file_is_io_error() {
        let config = CliConfig {
            settings_file: Some(PathBuf::from("/nonexistent/dpbuild.json")),
            ..CliConfig::default()
        };
        assert!(matches!(config.load_settings(), Err(CliError::Io(_))));
    }
}
