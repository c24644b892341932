//! Subcommands of the CLI.

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

/// Output format for `resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Resolution and build plan as JSON
    Json,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the build configuration and print the build plan
    Resolve {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the CMake arguments for the native build, one per line
    CmakeArgs,

    /// Check the interpreter, framework and build tool
    CheckDeps,

    /// Print the effective settings as JSON
    Settings,
}
