//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that call the resolver and format output for the terminal
//!
//! Handlers should NOT contain resolution logic.

pub mod check_deps;
pub mod cmake_args;
pub mod resolve;
pub mod settings;
