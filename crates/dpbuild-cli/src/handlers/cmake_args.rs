//! CMake arguments command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Print the native build arguments, one per line, for use in scripts.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let resolution = ctx.resolver.resolve().map_err(CliError::from)?;
    for arg in ctx.resolver.plan(&resolution.config).cmake_args {
        println!("{arg}");
    }
    Ok(())
}
