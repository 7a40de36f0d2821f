//! Package manager facade for the extension manager
//!
//! This crate ties the collaborator crates together:
//!
//! - **Setup**: manifest reload, transport decision and registry ping, with
//!   every failure absorbed into diagnostics or the message queue
//! - **Reconciliation**: installed packages merged with declared requirements
//!   into one status table
//! - **Dispatch**: ten package actions forwarded to their registered executors
//! - **Configuration**: the host's `extend.toml`
//!
//! # Architecture
//!
//! ```text
//!                    ext-cli
//!                       |
//!                   ext-core
//!                       |
//!       +---------------+---------------+
//!       |               |               |
//! ext-manifest      ext-probe      ext-actions
//! ```

pub mod config;
pub mod connectivity;
pub mod diagnostics;
pub mod error;
pub mod manager;
pub mod status;
pub mod transport;

pub use config::{CONFIG_FILENAME, ExtendConfig};
pub use connectivity::{classify, ping_request};
pub use diagnostics::{DiagnosticSink, FlashBag, Severity, TracingSink};
pub use error::{Error, Result};
pub use manager::{PackageManager, PackageManagerBuilder};
pub use status::{
    PackageStatus, PackageStatusEntry, PackageStatusMap, PlatformVersion, ResolutionStatus,
    reconcile,
};
pub use transport::{TransportDecision, is_secure};
