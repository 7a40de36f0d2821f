//! Extension manager CLI
//!
//! The command-line interface for installing and inspecting extensions.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::CliContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // A subscriber may already be installed when embedded; keep that one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
    tracing::debug!("Verbose mode enabled");
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        println!("{} Extension manager CLI", "extend".green().bold());
        println!();
        println!("Run {} for available commands.", "extend --help".cyan());
        return Ok(());
    };

    let cwd = std::env::current_dir()?;
    let ctx = CliContext::load(cli.config.as_deref(), &cwd)?;
    execute_command(&ctx, command)
}

fn execute_command(ctx: &CliContext, command: Commands) -> Result<()> {
    match command {
        Commands::Status { json } => commands::run_status(ctx, json),
        Commands::Ping => commands::run_ping(ctx),
        Commands::Init { path } => commands::run_init(ctx, path.as_deref()),
        action => commands::run_action(ctx, action),
    }
}
