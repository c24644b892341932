//! Command-line adapter for dpbuild.
//!
//! `main.rs` is the composition root; everything else here parses
//! arguments, wires adapters through `bootstrap`, and formats output.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;

// Used by main.rs only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, OutputFormat};
pub use error::CliError;
pub use parser::Cli;
