//! Check build environment handler.
//!
//! Reports what the resolver would find for the interpreter, the framework
//! and the build tool, with install hints for anything missing. Nothing
//! reported here is fatal: missing pieces are fetched at setup time.

mod display;
mod platform;

use anyhow::Result;
use dpbuild_core::{BuildToolStatus, InstallLocation, InterpreterInfo};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use display::print_check;
use platform::{detect_os, install_hint};

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Outcome of one environment check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckState {
    /// Usable as-is; carries a short detail such as a version.
    Ready(String),
    /// Not usable as-is but the build can proceed.
    Degraded(String),
    Missing,
}

/// One row of the environment table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: &'static str,
    pub state: CheckState,
    pub note: String,
}

impl Check {
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, CheckState::Ready(_))
    }
}

/// Execute the check-deps command.
pub fn execute(ctx: &CliContext) -> Result<()> {
    println!("{BOLD}{BLUE}Checking build environment...{RESET}\n");

    let settings = ctx.resolver.settings();
    let spec = ctx.resolver.resolve_version_spec().map_err(CliError::from)?;
    let (location, _) = ctx.resolver.locate_framework(&spec);
    let checks = collect_checks(
        ctx.deps.modules.interpreter_info(),
        &settings.framework_package,
        &location,
        &settings.build_tool,
        &ctx.resolver.check_build_tool(),
    );

    println!("{BOLD}{:<20} {:<25} {:<50}{RESET}", "COMPONENT", "STATUS", "NOTES");
    println!("{}", "=".repeat(85));
    for check in &checks {
        print_check(check);
    }
    println!("{}", "=".repeat(85));

    let pending: Vec<&Check> = checks.iter().filter(|c| !c.is_ready()).collect();
    if pending.is_empty() {
        println!("{GREEN}✓ Build environment is complete{RESET}");
        return Ok(());
    }

    println!(
        "{YELLOW}○ {} of {} components will be provided at setup time{RESET}\n",
        pending.len(),
        checks.len()
    );
    let os = detect_os();
    for check in pending {
        if let Some(hint) = install_hint(check.name, os) {
            println!("  {BOLD}{}{RESET}: {hint}", check.name);
        }
    }
    Ok(())
}

/// Turn probe results into table rows.
pub fn collect_checks(
    interpreter: Option<InterpreterInfo>,
    framework: &str,
    location: &InstallLocation,
    build_tool: &str,
    tool_status: &BuildToolStatus,
) -> Vec<Check> {
    let python = match interpreter {
        Some(info) => Check {
            name: "python",
            state: CheckState::Ready(info.python_version),
            note: info.platform,
        },
        None => Check {
            name: "python",
            state: CheckState::Missing,
            note: "platform tag taken from the host".to_string(),
        },
    };

    let framework_check = Check {
        name: "framework",
        state: if location.is_placeholder() {
            CheckState::Degraded(format!("{framework} absent"))
        } else {
            CheckState::Ready(framework.to_string())
        },
        note: format!("{} ({})", location.path().display(), location.source_name()),
    };

    let tool = match tool_status {
        BuildToolStatus::Sufficient { version } => Check {
            name: "build tool",
            state: CheckState::Ready(format!("{build_tool} {version}")),
            note: String::new(),
        },
        BuildToolStatus::Outdated { version, minimum } => Check {
            name: "build tool",
            state: CheckState::Degraded(format!("{build_tool} {version}")),
            note: format!("older than {minimum}; added to setup requirements"),
        },
        BuildToolStatus::Unparseable { raw } => Check {
            name: "build tool",
            state: CheckState::Degraded(build_tool.to_string()),
            note: format!("unrecognised version '{raw}'; added to setup requirements"),
        },
        BuildToolStatus::Missing => Check {
            name: "build tool",
            state: CheckState::Missing,
            note: "added to setup requirements".to_string(),
        },
    };

    vec![python, framework_check, tool]
}
