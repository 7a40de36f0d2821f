//! Package action executors for Extension Manager.
//!
//! Every high-level package operation is one of the ten [`ActionKind`]s. An
//! [`ActionRegistry`] binds each kind to an [`Executor`], which performs the
//! operation and hands back an [`ActionResult`].
//!
//! # Architecture
//!
//! The registry is the only dispatch table. Executors are uniform: they take
//! a typed [`ActionArgs`] value and know nothing about the package manager
//! calling them. [`CommandExecutor`] is the shipped implementation and drives
//! a `composer`-compatible command-line tool, capturing its output into a
//! shared [`BufferedOutput`].

pub mod action;
pub mod command;
pub mod error;
pub mod executor;
pub mod output;
pub mod package;
pub mod registry;

pub use action::{ActionArgs, ActionKind, ActionResult, ShowQuery, ShowTarget};
pub use command::{CommandExecutor, CommandTool, locate_tool};
pub use error::{ExecutorError, Result};
pub use executor::Executor;
pub use output::{BufferedOutput, OutputCapture};
pub use package::{Author, InstalledPackage, PackageMetadata};
pub use registry::ActionRegistry;
