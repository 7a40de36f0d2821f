//! Package action commands
//!
//! Each action is forwarded to the package manager unchanged. Tool output is
//! echoed, and a non-zero tool exit becomes a CLI error.

use colored::Colorize;
use ext_actions::{ActionKind, ActionResult, ShowQuery};
use ext_core::PackageManager;

use super::print_setup_notes;
use crate::cli::Commands;
use crate::context::CliContext;
use crate::error::{CliError, Result};

/// Run an action subcommand
pub fn run_action(ctx: &CliContext, command: Commands) -> Result<()> {
    let (manager, flashes) = ctx.manager();
    print_setup_notes(&manager, &flashes);

    let (kind, result) = dispatch(&manager, command)?;
    report(kind, &result, &manager.get_output())
}

fn dispatch(manager: &PackageManager, command: Commands) -> Result<(ActionKind, ActionResult)> {
    let dispatched = match command {
        Commands::Check => (ActionKind::Check, manager.check_package()?),
        Commands::Depends {
            package,
            constraint,
        } => (
            ActionKind::Depends,
            manager.depends_package(package, constraint)?,
        ),
        Commands::Autoload => (ActionKind::Autoload, manager.dump_autoload()?),
        Commands::Install => (ActionKind::Install, manager.install_packages()?),
        Commands::Prohibits {
            package,
            constraint,
        } => (
            ActionKind::Prohibits,
            manager.prohibits_package(package, constraint)?,
        ),
        Commands::Remove { packages } => (ActionKind::Remove, manager.remove_package(packages)?),
        Commands::Require { packages } => {
            (ActionKind::Require, manager.require_package(packages)?)
        }
        Commands::Search { terms } => (ActionKind::Search, manager.search_package(terms)?),
        Commands::Show {
            package,
            version,
            target,
        } => (
            ActionKind::Show,
            manager.show_package(ShowQuery {
                target: target.into(),
                package,
                version,
            })?,
        ),
        Commands::Update { packages } => (ActionKind::Update, manager.update_package(packages)?),
        other => {
            return Err(CliError::user(format!("{:?} is not a package action", other)));
        }
    };
    Ok(dispatched)
}

fn report(kind: ActionKind, result: &ActionResult, output: &str) -> Result<()> {
    match result {
        ActionResult::ExitCode(code) => {
            print!("{}", output);
            if *code != 0 {
                return Err(CliError::user(format!(
                    "'{}' failed with exit code {}",
                    kind, code
                )));
            }
            println!("{} {} finished", "=>".blue().bold(), kind.to_string().cyan());
        }
        ActionResult::Installed(packages) => {
            if packages.is_empty() {
                println!("  {}", "No packages installed".dimmed());
            }
            for package in packages {
                println!(
                    "  {} {}",
                    package.name().cyan(),
                    package.version_pretty
                );
            }
        }
        ActionResult::Value(value) => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ActionResult::Flag(flag) => {
            if !*flag {
                return Err(CliError::user(format!("'{}' failed", kind)));
            }
            println!("{} {} finished", "=>".blue().bold(), kind.to_string().cyan());
        }
    }
    Ok(())
}
