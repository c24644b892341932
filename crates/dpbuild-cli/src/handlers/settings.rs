//! Settings command handler.

use anyhow::{Context, Result};

use crate::bootstrap::CliContext;

/// Print the effective settings as JSON.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let json = serde_json::to_string_pretty(ctx.resolver.settings())
        .context("Failed to serialize settings")?;
    println!("{json}");
    Ok(())
}
