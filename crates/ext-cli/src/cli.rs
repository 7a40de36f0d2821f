//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ext_actions::ShowTarget;

/// Extension manager - install and inspect extensions for the host application
#[derive(Parser, Debug)]
#[command(name = "extend")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./extend.toml when present)
    #[arg(short, long, global = true, env = "EXTEND_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Package set listed by `show`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowScope {
    #[default]
    Installed,
    Available,
    Platform,
    #[value(name = "self")]
    Root,
}

impl From<ShowScope> for ShowTarget {
    fn from(scope: ShowScope) -> Self {
        match scope {
            ShowScope::Installed => ShowTarget::Installed,
            ShowScope::Available => ShowTarget::Available,
            ShowScope::Platform => ShowTarget::Platform,
            ShowScope::Root => ShowTarget::Root,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show installed and required extensions
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Test the connection to the extension server
    Ping,

    /// Write a fresh manifest
    ///
    /// Examples:
    ///   extend init                        # At the configured manifest path
    ///   extend init extensions/other.json  # At a custom path
    Init {
        /// Manifest path (defaults to the configured manifest)
        path: Option<PathBuf>,
    },

    /// Check whether the requirements can be resolved
    Check,

    /// Show which packages depend on a package
    Depends {
        package: Option<String>,
        constraint: Option<String>,
    },

    /// Regenerate the autoloader
    Autoload,

    /// Install everything the manifest requires
    Install,

    /// Show which packages prevent a package from being installed
    Prohibits {
        package: Option<String>,
        constraint: Option<String>,
    },

    /// Remove packages
    Remove {
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Require packages, e.g. `vendor/gallery:^3.0`
    Require {
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Search the extension repositories
    Search {
        #[arg(required = true)]
        terms: Vec<String>,
    },

    /// Show package details
    Show {
        package: Option<String>,
        version: Option<String>,

        /// Which package set to list
        #[arg(long, value_enum, default_value_t = ShowScope::Installed)]
        target: ShowScope,
    },

    /// Update packages (all when none are given)
    Update { packages: Vec<String> },
}
