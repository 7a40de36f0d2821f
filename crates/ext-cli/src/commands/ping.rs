//! Ping command implementation

use colored::Colorize;

use crate::context::CliContext;
use crate::error::{CliError, Result};

/// Run the ping command
///
/// The ping itself happens during manager setup; this reports its outcome.
pub fn run_ping(ctx: &CliContext) -> Result<()> {
    if !ctx.config.writeable {
        return Err(CliError::user(
            "Extension location is not writeable; the server is only contacted when it is",
        ));
    }

    let (manager, flashes) = ctx.manager();
    for (severity, message) in flashes.drain() {
        eprintln!("{}: {}", severity.as_str().red().bold(), message);
    }

    if manager.is_online() {
        println!(
            "{} {} is reachable{}",
            "=>".blue().bold(),
            ctx.config.site.cyan(),
            if manager.use_ssl() { "" } else { " (insecure)" }
        );
        return Ok(());
    }

    let message = manager
        .get_messages()
        .first()
        .cloned()
        .unwrap_or_else(|| "Extension server is unreachable".to_string());
    Err(CliError::user(message))
}
