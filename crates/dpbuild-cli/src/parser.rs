//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Resolve the native build environment of a framework-linked package.
#[derive(Parser)]
#[command(name = "dpbuild")]
#[command(about = "Resolve framework, install directory and build tool requirements for a native build")]
#[command(version = dpbuild_build_info::LONG_VERSION)]
pub struct Cli {
    /// JSON settings file; missing fields keep their defaults
    #[arg(long, env = "DPBUILD_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Root of the package being built
    #[arg(long = "project-root", env = "DPBUILD_PROJECT_ROOT", global = true)]
    pub project_root: Option<PathBuf>,

    /// Python interpreter to query instead of the one on PATH
    #[arg(long, env = "DPBUILD_PYTHON", global = true)]
    pub python: Option<PathBuf>,

    /// CMake executable to probe instead of the one on PATH
    #[arg(long, env = "DPBUILD_CMAKE", global = true)]
    pub cmake: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
