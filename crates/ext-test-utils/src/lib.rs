//! Shared test utilities for the extension-manager workspace.
//!
//! In-memory stand-ins for the package manager's collaborators. Every double
//! is cheap to clone and clones share their recorded state, so a test can
//! hand one clone to the code under test and inspect the other afterwards.
//! It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`manifest`]: [`StubManifest`] manifest store
//! - [`probe`]: [`StubProber`] connectivity prober
//! - [`actions`]: [`RecordingExecutor`], [`StaticOutput`] and package fixtures

pub mod actions;
pub mod manifest;
pub mod probe;

pub use actions::{RecordingExecutor, StaticOutput, installed};
pub use manifest::StubManifest;
pub use probe::StubProber;
