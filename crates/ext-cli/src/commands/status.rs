//! Status command implementation

use colored::Colorize;
use ext_core::{PackageStatus, PackageStatusMap};

use super::print_setup_notes;
use crate::context::CliContext;
use crate::error::Result;

/// Run the status command
pub fn run_status(ctx: &CliContext, json: bool) -> Result<()> {
    let (manager, flashes) = ctx.manager();
    print_setup_notes(&manager, &flashes);

    let packages = manager.get_all_packages()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&packages)?);
        return Ok(());
    }

    println!("{}", "Extension Status".bold());
    println!();
    match &ctx.source {
        Some(path) => println!("{}:     {}", "Config".dimmed(), path.display()),
        None => println!("{}:     {}", "Config".dimmed(), "defaults".dimmed()),
    }
    println!("{}:   {}", "Manifest".dimmed(), ctx.config.manifest.display());
    println!("{}:   {}", "Server".dimmed(), ctx.config.site);
    println!(
        "{}:   {}",
        "Online".dimmed(),
        if manager.is_online() {
            "yes".green()
        } else {
            "no".yellow()
        }
    );
    println!();
    print_packages(&packages);

    Ok(())
}

fn print_packages(packages: &PackageStatusMap) {
    println!("{}:", "Packages".bold());
    if packages.is_empty() {
        println!("  {} (use {} to add)", "None".dimmed(), "extend require".cyan());
        return;
    }

    for entry in packages.values() {
        match entry.status {
            PackageStatus::Installed => println!(
                "  {} {} {} ({})",
                "+".green(),
                entry.name.cyan(),
                entry.version,
                "installed".green()
            ),
            PackageStatus::Pending => println!(
                "  {} {} {} ({})",
                "-".yellow(),
                entry.name.cyan(),
                entry.version,
                "pending".yellow()
            ),
        }
    }
}
