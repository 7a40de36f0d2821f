//! Command implementations for ext-cli

pub mod action;
pub mod init;
pub mod ping;
pub mod status;

pub use action::run_action;
pub use init::run_init;
pub use ping::run_ping;
pub use status::run_status;

use colored::Colorize;
use ext_core::{FlashBag, PackageManager, Severity};

/// Print setup diagnostics and queued messages to stderr.
pub(crate) fn print_setup_notes(manager: &PackageManager, flashes: &FlashBag) {
    for (severity, message) in flashes.drain() {
        let label = match severity {
            Severity::Danger | Severity::Error => severity.as_str().red().bold(),
            Severity::Warning => severity.as_str().yellow().bold(),
            Severity::Info | Severity::Success => severity.as_str().green().bold(),
        };
        eprintln!("{}: {}", label, message);
    }
    for message in manager.get_messages() {
        eprintln!("{}: {}", "warning".yellow().bold(), message);
    }
}
