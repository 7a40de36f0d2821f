//! Init command implementation

use std::path::Path;

use colored::Colorize;

use crate::context::CliContext;
use crate::error::{CliError, Result};

/// Run the init command
pub fn run_init(ctx: &CliContext, path: Option<&Path>) -> Result<()> {
    let path = path.unwrap_or(&ctx.config.manifest);
    if path.exists() {
        return Err(CliError::user(format!(
            "Manifest already exists at '{}'",
            path.display()
        )));
    }

    let manager = ctx.manager_without_setup();
    let document = manager.init_json(path, &ctx.config.manifest_options())?;

    println!(
        "{} Wrote {} ({})",
        "=>".blue().bold(),
        path.display().to_string().cyan(),
        document.name.as_deref().unwrap_or("unnamed")
    );
    println!(
        "   {} Run {} to add extensions",
        "Next:".dimmed(),
        "extend require <package>".bold()
    );
    Ok(())
}
