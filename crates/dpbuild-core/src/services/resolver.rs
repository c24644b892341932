//! Native dependency resolver.
//!
//! Produces a `BuildConfig` from the process environment, the target
//! interpreter and the local build tool. Every lookup that can come up
//! empty has a fallback; the only hard failures are invalid settings and a
//! malformed requested version.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{
    BuildConfig, BuildPlan, BuildToolStatus, Comparator, EggName, FrameworkVariants, InstallLocation, Lookup,
    Version, VersionError, VersionSpec, host_platform_tag,
};
use crate::ports::{
    BuildToolProbePort, DirectoryCreatorPort, DirectoryFinderPort, EnvironmentPort,
    ModuleLocatorPort,
};
use crate::settings::{ResolverSettings, SettingsError, validate_settings};

/// Python tag used in placeholder egg names when no interpreter answers.
const FALLBACK_PYTHON_TAG: &str = "3";

/// Errors that abort resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The requested framework version could not be parsed.
    #[error("Invalid framework version '{value}' (from {source_name}): {source}")]
    InvalidVersion {
        value: String,
        source_name: String,
        #[source]
        source: VersionError,
    },

    /// The requested version uses a comparator that excludes the version
    /// it names, so no install directory can be predicted for it.
    #[error("Unsupported framework version '{value}' (from {source_name}): '{comparator}' excludes the named version")]
    UnsupportedQualifier {
        value: String,
        source_name: String,
        comparator: Comparator,
    },

    /// Settings failed validation.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Outcome of ensuring the package output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutputDirStatus {
    Created,
    AlreadyPresent,
    /// Creation failed for another reason; logged and otherwise ignored.
    Failed { reason: String },
}

/// Result of a full resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub config: BuildConfig,
    pub output_dir: PathBuf,
    pub output_dir_status: OutputDirStatus,
}

/// External collaborators of the resolver.
#[derive(Clone)]
pub struct ResolverDeps {
    pub env: Arc<dyn EnvironmentPort>,
    pub modules: Arc<dyn ModuleLocatorPort>,
    pub finder: Arc<dyn DirectoryFinderPort>,
    pub build_tool: Arc<dyn BuildToolProbePort>,
    pub dirs: Arc<dyn DirectoryCreatorPort>,
}

/// Resolves the build configuration through injected ports.
pub struct DependencyResolver {
    settings: ResolverSettings,
    min_build_tool: Version,
    deps: ResolverDeps,
}

impl DependencyResolver {
    /// Create a resolver, validating `settings` first.
    pub fn new(settings: ResolverSettings, deps: ResolverDeps) -> Result<Self, ResolveError> {
        validate_settings(&settings)?;
        let min_build_tool = settings.min_build_tool()?;
        Ok(Self {
            settings,
            min_build_tool,
            deps,
        })
    }

    pub const fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Step 1: the requested framework version.
    ///
    /// The environment variable wins when set and non-blank; otherwise the
    /// configured default applies. `!=`, `<` and `>` are rejected.
    pub fn resolve_version_spec(&self) -> Result<VersionSpec, ResolveError> {
        let var = &self.settings.version_env_var;
        let (value, source_name) = match self.deps.env.var(var) {
            Some(value) if !value.trim().is_empty() => (value, var.clone()),
            _ => (
                self.settings.default_framework_version.clone(),
                "default".to_string(),
            ),
        };

        let spec = VersionSpec::parse(&value).map_err(|source| ResolveError::InvalidVersion {
            value: value.clone(),
            source_name: source_name.clone(),
            source,
        })?;
        if !spec.comparator.admits_named_version() {
            return Err(ResolveError::UnsupportedQualifier {
                value,
                source_name,
                comparator: spec.comparator,
            });
        }
        debug!(version = %spec, from = %source_name, "Resolved framework version");
        Ok(spec)
    }

    /// Step 2: CPU and GPU install targets for `spec`.
    pub fn select_variants(&self, spec: &VersionSpec) -> FrameworkVariants {
        FrameworkVariants::select(&self.settings.framework_package, spec)
    }

    /// Step 3: locate an installed framework, falling back to a placeholder.
    ///
    /// Returns the location and, for the placeholder tier, the framework
    /// requirement that has to be fetched before the native build.
    pub fn locate_framework(&self, spec: &VersionSpec) -> (InstallLocation, Option<String>) {
        let package = &self.settings.framework_package;

        if let Lookup::Found(path) = self.deps.modules.find_package(package) {
            info!(path = %path.display(), "Framework found via module resolution");
            return (InstallLocation::Module(path), None);
        }
        debug!(package = %package, "Framework not importable, scanning site-packages");

        let interpreter = self.deps.modules.interpreter_info();

        match interpreter.as_ref().and_then(|i| i.stdlib_dir.as_ref()) {
            Some(stdlib_dir) => {
                let site_packages = stdlib_dir.join("site-packages");
                if let Lookup::Found(path) =
                    self.deps.finder.find_package_in(&site_packages, package)
                {
                    info!(path = %path.display(), "Framework found in site-packages");
                    return (InstallLocation::SitePackages(path), None);
                }
                debug!(dir = %site_packages.display(), "Framework not in site-packages");
            }
            None => debug!("No interpreter stdlib directory, skipping site-packages scan"),
        }

        let (python_version, platform) = match interpreter {
            Some(info) => (info.python_version, info.platform),
            None => {
                let deployment_target = self.deps.env.var("MACOSX_DEPLOYMENT_TARGET");
                (
                    FALLBACK_PYTHON_TAG.to_string(),
                    host_platform_tag(deployment_target.as_deref()),
                )
            }
        };

        let egg = EggName {
            project: package.clone(),
            version: spec.version.normalized(),
            python_version,
            platform: Some(platform),
        };
        let path = self
            .settings
            .project_root
            .join(".egg")
            .join(egg.to_string())
            .join(package);
        let requirement = spec.requirement(package);

        info!(
            requirement = %requirement,
            placeholder = %path.display(),
            "Framework not installed, deferring to setup-time install"
        );
        (InstallLocation::Placeholder(path), Some(requirement))
    }

    /// Step 4: whether the local build tool is usable.
    pub fn check_build_tool(&self) -> BuildToolStatus {
        let status =
            BuildToolStatus::assess(self.deps.build_tool.probe_version(), &self.min_build_tool);
        let tool = &self.settings.build_tool;
        match &status {
            BuildToolStatus::Sufficient { version } => {
                debug!(tool = %tool, version = %version, "Build tool is sufficient");
            }
            BuildToolStatus::Outdated { version, minimum } => {
                info!(tool = %tool, version = %version, minimum = %minimum, "Build tool is too old");
            }
            BuildToolStatus::Unparseable { raw } => {
                warn!(tool = %tool, raw = %raw, "Could not parse build tool version");
            }
            BuildToolStatus::Missing => info!(tool = %tool, "Build tool not found"),
        }
        status
    }

    /// Step 5: create the package output directory if it is missing.
    ///
    /// Idempotent. Never fails; unexpected errors are logged.
    pub fn ensure_output_dir(&self) -> OutputDirStatus {
        let path = self.settings.output_dir_path();
        match self.deps.dirs.create_dir(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Created output directory");
                OutputDirStatus::Created
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                OutputDirStatus::AlreadyPresent
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Failed to create output directory");
                OutputDirStatus::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Run every step and collect the result.
    pub fn resolve(&self) -> Result<Resolution, ResolveError> {
        let framework_version = self.resolve_version_spec()?;
        let variants = self.select_variants(&framework_version);
        let (install_location, framework_setup_requirement) =
            self.locate_framework(&framework_version);
        let build_tool = self.check_build_tool();
        let output_dir_status = self.ensure_output_dir();

        Ok(Resolution {
            config: BuildConfig {
                framework_version,
                variants,
                install_location,
                framework_setup_requirement,
                build_tool,
            },
            output_dir: self.settings.output_dir_path(),
            output_dir_status,
        })
    }

    /// Requirement lists and native build arguments for `config`.
    pub fn plan(&self, config: &BuildConfig) -> BuildPlan {
        BuildPlan::assemble(config, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::domain::{InterpreterInfo, PackageNaming, ToolProbe};
    use crate::ports::{
        MockBuildToolProbePort, MockDirectoryCreatorPort, MockDirectoryFinderPort,
        MockEnvironmentPort, MockModuleLocatorPort,
    };

    struct Mocks {
        env: MockEnvironmentPort,
        modules: MockModuleLocatorPort,
        finder: MockDirectoryFinderPort,
        build_tool: MockBuildToolProbePort,
        dirs: MockDirectoryCreatorPort,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                env: MockEnvironmentPort::new(),
                modules: MockModuleLocatorPort::new(),
                finder: MockDirectoryFinderPort::new(),
                build_tool: MockBuildToolProbePort::new(),
                dirs: MockDirectoryCreatorPort::new(),
            }
        }

        fn into_resolver(self) -> DependencyResolver {
            let settings = ResolverSettings {
                project_root: PathBuf::from("/src/pkg"),
                ..ResolverSettings::with_defaults()
            };
            DependencyResolver::new(
                settings,
                ResolverDeps {
                    env: Arc::new(self.env),
                    modules: Arc::new(self.modules),
                    finder: Arc::new(self.finder),
                    build_tool: Arc::new(self.build_tool),
                    dirs: Arc::new(self.dirs),
                },
            )
            .unwrap()
        }
    }

    fn interpreter() -> InterpreterInfo {
        InterpreterInfo {
            python_version: "3.8".to_string(),
            platform: "linux-x86_64".to_string(),
            stdlib_dir: Some(PathBuf::from("/usr/lib/python3.8")),
        }
    }

    #[test]
    fn test_version_from_env_var() {
        let mut mocks = Mocks::new();
        mocks
            .env
            .expect_var()
            .returning(|key| (key == "TENSORFLOW_VERSION").then(|| "1.14".to_string()));
        let resolver = mocks.into_resolver();

        let spec = resolver.resolve_version_spec().unwrap();
        assert_eq!(spec.version.as_str(), "1.14");
        assert_eq!(
            resolver.select_variants(&spec).naming,
            PackageNaming::Legacy
        );
    }

    #[test]
    fn test_blank_env_var_uses_default() {
        let mut mocks = Mocks::new();
        mocks.env.expect_var().returning(|_| Some("   ".to_string()));
        let resolver = mocks.into_resolver();

        assert_eq!(resolver.resolve_version_spec().unwrap().to_string(), "==2.3");
    }

    #[test]
    fn test_malformed_env_var_is_rejected() {
        let mut mocks = Mocks::new();
        mocks.env.expect_var().returning(|_| Some("two".to_string()));
        let resolver = mocks.into_resolver();

        let err = resolver.resolve_version_spec().unwrap_err();
        assert!(matches!(err, ResolveError::InvalidVersion { ref source_name, .. } if source_name == "TENSORFLOW_VERSION"));
    }

    #[test]
    fn test_module_resolution_short_circuits() {
        let mut mocks = Mocks::new();
        mocks
            .modules
            .expect_find_package()
            .returning(|_| Lookup::Found(PathBuf::from("/venv/site-packages/tensorflow")));
        mocks.modules.expect_interpreter_info().never();
        mocks.finder.expect_find_package_in().never();
        let resolver = mocks.into_resolver();

        let spec = VersionSpec::parse("2.3").unwrap();
        let (location, requirement) = resolver.locate_framework(&spec);
        assert_eq!(
            location,
            InstallLocation::Module(PathBuf::from("/venv/site-packages/tensorflow"))
        );
        assert!(requirement.is_none());
    }

    #[test]
    fn test_site_packages_fallback() {
        let mut mocks = Mocks::new();
        mocks
            .modules
            .expect_find_package()
            .returning(|_| Lookup::NotFound);
        mocks
            .modules
            .expect_interpreter_info()
            .returning(|| Some(interpreter()));
        mocks
            .finder
            .expect_find_package_in()
            .times(1)
            .returning(|dir: &Path, name: &str| {
                assert_eq!(dir, Path::new("/usr/lib/python3.8/site-packages"));
                Lookup::Found(dir.join(name))
            });
        let resolver = mocks.into_resolver();

        let spec = VersionSpec::parse("2.3").unwrap();
        let (location, requirement) = resolver.locate_framework(&spec);
        assert_eq!(
            location,
            InstallLocation::SitePackages(PathBuf::from(
                "/usr/lib/python3.8/site-packages/tensorflow"
            ))
        );
        assert!(requirement.is_none());
    }

    #[test]
    fn test_placeholder_when_not_installed() {
        let mut mocks = Mocks::new();
        mocks
            .modules
            .expect_find_package()
            .returning(|_| Lookup::NotFound);
        mocks
            .modules
            .expect_interpreter_info()
            .returning(|| Some(interpreter()));
        mocks
            .finder
            .expect_find_package_in()
            .returning(|_, _| Lookup::NotFound);
        let resolver = mocks.into_resolver();

        let spec = VersionSpec::parse("2.3").unwrap();
        let (location, requirement) = resolver.locate_framework(&spec);
        assert_eq!(
            location,
            InstallLocation::Placeholder(PathBuf::from(
                "/src/pkg/.egg/tensorflow-2.3-py3.8-linux-x86_64/tensorflow"
            ))
        );
        assert_eq!(requirement.as_deref(), Some("tensorflow==2.3"));
    }

    #[test]
    fn test_placeholder_uses_normalized_version() {
        let mut mocks = Mocks::new();
        mocks
            .modules
            .expect_find_package()
            .returning(|_| Lookup::NotFound);
        mocks
            .modules
            .expect_interpreter_info()
            .returning(|| Some(interpreter()));
        mocks
            .finder
            .expect_find_package_in()
            .returning(|_, _| Lookup::NotFound);
        let resolver = mocks.into_resolver();

        let spec = VersionSpec::parse("2.4.0-RC1").unwrap();
        let (location, requirement) = resolver.locate_framework(&spec);
        assert_eq!(
            location,
            InstallLocation::Placeholder(PathBuf::from(
                "/src/pkg/.egg/tensorflow-2.4.0rc1-py3.8-linux-x86_64/tensorflow"
            ))
        );
        assert_eq!(requirement.as_deref(), Some("tensorflow==2.4.0-RC1"));
    }

    #[test]
    fn test_exclusive_env_qualifier_is_rejected() {
        for value in ["!=2.3", "<2.3", ">2.3"] {
            let mut mocks = Mocks::new();
            mocks
                .env
                .expect_var()
                .returning(move |_| Some(value.to_string()));
            let resolver = mocks.into_resolver();

            assert!(
                matches!(
                    resolver.resolve_version_spec(),
                    Err(ResolveError::UnsupportedQualifier { .. })
                ),
                "{value}"
            );
        }
    }

    #[test]
    fn test_placeholder_without_interpreter() {
        let mut mocks = Mocks::new();
        mocks.env.expect_var().returning(|_| None);
        mocks
            .modules
            .expect_find_package()
            .returning(|_| Lookup::NotFound);
        mocks.modules.expect_interpreter_info().returning(|| None);
        mocks.finder.expect_find_package_in().never();
        let resolver = mocks.into_resolver();

        let spec = VersionSpec::parse("2.3").unwrap();
        let (location, _) = resolver.locate_framework(&spec);
        assert!(location.is_placeholder());
        let egg_dir = location
            .path()
            .parent()
            .and_then(Path::file_name)
            .unwrap()
            .to_string_lossy()
            .to_string();
        assert!(egg_dir.starts_with("tensorflow-2.3-py3-"), "{egg_dir}");
        assert!(egg_dir.ends_with(&host_platform_tag(None)), "{egg_dir}");
    }

    #[test]
    fn test_build_tool_checks() {
        let mut mocks = Mocks::new();
        let mut seq = mockall::Sequence::new();
        mocks
            .build_tool
            .expect_probe_version()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| ToolProbe::Found {
                version: "3.6".to_string(),
            });
        mocks
            .build_tool
            .expect_probe_version()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| ToolProbe::Found {
                version: "3.8".to_string(),
            });
        mocks
            .build_tool
            .expect_probe_version()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| ToolProbe::NotFound);
        let resolver = mocks.into_resolver();

        assert!(resolver.check_build_tool().requires_install());
        assert!(!resolver.check_build_tool().requires_install());
        assert_eq!(resolver.check_build_tool(), BuildToolStatus::Missing);
    }

    #[test]
    fn test_output_dir_is_idempotent() {
        let mut mocks = Mocks::new();
        let mut seq = mockall::Sequence::new();
        mocks
            .dirs
            .expect_create_dir()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        mocks
            .dirs
            .expect_create_dir()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(io::Error::from(io::ErrorKind::AlreadyExists)));
        let resolver = mocks.into_resolver();

        assert_eq!(resolver.ensure_output_dir(), OutputDirStatus::Created);
        assert_eq!(resolver.ensure_output_dir(), OutputDirStatus::AlreadyPresent);
    }

    #[test]
    fn test_output_dir_failure_is_not_fatal() {
        let mut mocks = Mocks::new();
        mocks
            .dirs
            .expect_create_dir()
            .returning(|_| Err(io::Error::from(io::ErrorKind::PermissionDenied)));
        let resolver = mocks.into_resolver();

        assert!(matches!(
            resolver.ensure_output_dir(),
            OutputDirStatus::Failed { .. }
        ));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mocks = Mocks::new();
        let settings = ResolverSettings {
            build_tool: String::new(),
            ..ResolverSettings::with_defaults()
        };
        let result = DependencyResolver::new(
            settings,
            ResolverDeps {
                env: Arc::new(mocks.env),
                modules: Arc::new(mocks.modules),
                finder: Arc::new(mocks.finder),
                build_tool: Arc::new(mocks.build_tool),
                dirs: Arc::new(mocks.dirs),
            },
        );
        assert!(matches!(result, Err(ResolveError::Settings(_))));
    }
}
