//! Resolve command handler.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dpbuild_core::{BuildPlan, BuildToolStatus, OutputDirStatus, Resolution};
use serde::Serialize;
use tracing::info;

use crate::bootstrap::CliContext;
use crate::commands::OutputFormat;
use crate::error::CliError;

/// JSON document emitted by `resolve --format json`.
#[derive(Debug, Serialize)]
pub struct ResolveReport<'a> {
    pub resolution: &'a Resolution,
    pub plan: &'a BuildPlan,
}

/// Execute the resolve command.
pub fn execute(ctx: &CliContext, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let resolution = ctx.resolver.resolve().map_err(CliError::from)?;
    let plan = ctx.resolver.plan(&resolution.config);

    let rendered = match format {
        OutputFormat::Json => {
            let report = ResolveReport {
                resolution: &resolution,
                plan: &plan,
            };
            serde_json::to_string_pretty(&report).context("Failed to serialize build plan")?
        }
        OutputFormat::Text => {
            render_text(&resolution, &plan, &ctx.resolver.settings().build_tool)
        }
    };

    match output {
        Some(path) => {
            fs::write(path, format!("{rendered}\n"))
                .map_err(CliError::from)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote build plan");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn describe_build_tool(tool: &str, status: &BuildToolStatus) -> String {
    match status {
        BuildToolStatus::Sufficient { version } => format!("{tool} {version} (sufficient)"),
        BuildToolStatus::Outdated { version, minimum } => {
            format!("{tool} {version} (older than {minimum}, will be fetched)")
        }
        BuildToolStatus::Unparseable { raw } => {
            format!("{tool} reported '{raw}' (unrecognised, will be fetched)")
        }
        BuildToolStatus::Missing => format!("{tool} not found (will be fetched)"),
    }
}

const fn describe_output_dir(status: &OutputDirStatus) -> &str {
    match status {
        OutputDirStatus::Created => "created",
        OutputDirStatus::AlreadyPresent => "already present",
        OutputDirStatus::Failed { .. } => "could not be created",
    }
}

/// Human-readable summary of a resolution and its plan.
pub fn render_text(resolution: &Resolution, plan: &BuildPlan, build_tool: &str) -> String {
    let config = &resolution.config;
    let location = &config.install_location;
    let mut lines = vec![
        format!(
            "{:<20}{} ({})",
            "Framework version",
            config.framework_version,
            config.variants.naming.display_name()
        ),
        format!("{:<20}{}", "  cpu extra", config.variants.cpu),
        format!("{:<20}{}", "  gpu extra", config.variants.gpu),
        format!(
            "{:<20}{} ({})",
            "Install location",
            location.path().display(),
            location.source_name()
        ),
        format!(
            "{:<20}{}",
            "Build tool",
            describe_build_tool(build_tool, &config.build_tool)
        ),
        format!(
            "{:<20}{} ({})",
            "Output directory",
            resolution.output_dir.display(),
            describe_output_dir(&resolution.output_dir_status)
        ),
        String::new(),
        format!("setup_requires:   {}", plan.setup_requires.join(", ")),
        format!("install_requires: {}", plan.install_requires.join(", ")),
        "extras_require:".to_string(),
    ];
    for (extra, requirements) in &plan.extras_require {
        lines.push(format!("  {extra:<8}{}", requirements.join(", ")));
    }
    lines.push("cmake_args:".to_string());
    for arg in &plan.cmake_args {
        lines.push(format!("  {arg}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use dpbuild_core::{
        BuildConfig, FrameworkVariants, InstallLocation, ResolverSettings, VersionSpec,
    };

    fn resolution() -> Resolution {
        let spec = VersionSpec::parse("2.3").unwrap();
        Resolution {
            config: BuildConfig {
                variants: FrameworkVariants::select("tensorflow", &spec),
                framework_version: spec,
                install_location: InstallLocation::Placeholder(PathBuf::from(
                    "/pkg/.egg/tensorflow-2.3-py3.8-linux-x86_64/tensorflow",
                )),
                framework_setup_requirement: Some("tensorflow==2.3".to_string()),
                build_tool: BuildToolStatus::Outdated {
                    version: "3.5.1".to_string(),
                    minimum: "3.7".to_string(),
                },
            },
            output_dir: PathBuf::from("/pkg/deepmd"),
            output_dir_status: OutputDirStatus::Created,
        }
    }

    #[test]
    fn test_text_summary_mentions_every_decision() {
        let resolution = resolution();
        let plan = BuildPlan::assemble(&resolution.config, &ResolverSettings::with_defaults());
        let text = render_text(&resolution, &plan, "cmake");

        assert!(text.contains("==2.3"));
        assert!(text.contains("tensorflow-cpu==2.3"));
        assert!(text.contains("(placeholder)"));
        assert!(text.contains("older than 3.7"));
        assert!(text.contains("setuptools_scm, scikit-build, tensorflow==2.3, cmake"));
        assert!(text.contains("-DFLOAT_PREC:STRING=high"));
    }

    #[test]
    fn test_text_summary_names_configured_build_tool() {
        let resolution = resolution();
        let plan = BuildPlan::assemble(&resolution.config, &ResolverSettings::with_defaults());
        let text = render_text(&resolution, &plan, "cmake3");

        assert!(text.contains("cmake3 3.5.1 (older than 3.7"));
    }

    #[test]
    fn test_json_report_shape() {
        let resolution = resolution();
        let plan = BuildPlan::assemble(&resolution.config, &ResolverSettings::with_defaults());
        let json = serde_json::to_value(ResolveReport {
            resolution: &resolution,
            plan: &plan,
        })
        .unwrap();

        assert_eq!(
            json["resolution"]["config"]["install_location"]["source"],
            "placeholder"
        );
        assert_eq!(json["resolution"]["config"]["build_tool"]["status"], "outdated");
        assert_eq!(json["resolution"]["output_dir_status"]["status"], "created");
        assert_eq!(json["plan"]["setup_requires"][3], "cmake");
    }
}
