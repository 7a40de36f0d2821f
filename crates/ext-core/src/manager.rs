//! The package manager facade
//!
//! A [`PackageManager`] is assembled by [`PackageManagerBuilder`] and runs its
//! setup exactly once, during [`PackageManagerBuilder::build`]:
//!
//! 1. reload the manifest through the [`ManifestStore`], capturing the
//!    declared requirements,
//! 2. compute the registry transport decision,
//! 3. ping the registry through the [`ConnectivityProber`].
//!
//! Setup never fails. A broken manifest is reported to the
//! [`DiagnosticSink`] at [`Severity::Danger`]; a failed ping is classified
//! into the message queue. When the host's write gate is closed none of
//! this happens.
//!
//! Queries and actions run independently after setup and propagate their
//! errors unchanged.

use std::cell::Cell;
use std::path::Path;

use ext_actions::{
    ActionArgs, ActionKind, ActionRegistry, ActionResult, BufferedOutput, CommandTool,
    OutputCapture, ShowQuery,
};
use ext_manifest::{JsonManifestStore, ManifestDocument, ManifestOptions, ManifestStore};
use ext_probe::{ConnectivityProber, HttpProber, ProbeFailure, ProbeRequest, ProbeResponse};
use indexmap::IndexMap;

use crate::connectivity::{classify, ping_request};
use crate::diagnostics::{DiagnosticSink, Severity, TracingSink};
use crate::status::{PackageStatusMap, PlatformVersion, ResolutionStatus, reconcile};
use crate::transport::TransportDecision;
use crate::{Error, ExtendConfig, Result};

/// Stands in for an HTTP prober whose client could not be built.
struct UnavailableProber {
    reason: String,
}

impl ConnectivityProber for UnavailableProber {
    fn probe(&self, _request: &ProbeRequest) -> std::result::Result<ProbeResponse, ProbeFailure> {
        Err(ProbeFailure::other(self.reason.clone()))
    }
}

/// Assembles a [`PackageManager`] from its collaborators.
///
/// Any collaborator left unset gets the shipped implementation: a
/// [`JsonManifestStore`] at the configured manifest path, an
/// [`HttpProber`], command executors driving the configured tool, a
/// [`TracingSink`] and a [`PlatformVersion`] resolution.
///
/// # Example
///
/// ```ignore
/// use ext_core::{ExtendConfig, PackageManager};
///
/// let manager = PackageManager::builder(ExtendConfig::default()).build();
/// for message in manager.get_messages() {
///     eprintln!("{message}");
/// }
/// ```
pub struct PackageManagerBuilder {
    config: ExtendConfig,
    manifest: Option<Box<dyn ManifestStore>>,
    prober: Option<Box<dyn ConnectivityProber>>,
    registry: Option<ActionRegistry>,
    sink: Option<Box<dyn DiagnosticSink>>,
    resolution: Option<Box<dyn ResolutionStatus>>,
    output: Option<Box<dyn OutputCapture>>,
}

impl PackageManagerBuilder {
    pub fn new(config: ExtendConfig) -> Self {
        Self {
            config,
            manifest: None,
            prober: None,
            registry: None,
            sink: None,
            resolution: None,
            output: None,
        }
    }

    pub fn manifest(mut self, manifest: impl ManifestStore + 'static) -> Self {
        self.manifest = Some(Box::new(manifest));
        self
    }

    pub fn prober(mut self, prober: impl ConnectivityProber + 'static) -> Self {
        self.prober = Some(Box::new(prober));
        self
    }

    pub fn registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn resolution(mut self, resolution: impl ResolutionStatus + 'static) -> Self {
        self.resolution = Some(Box::new(resolution));
        self
    }

    pub fn output(mut self, output: impl OutputCapture + 'static) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Build the manager and run its setup.
    pub fn build(self) -> PackageManager {
        let config = self.config;
        let buffer = BufferedOutput::new();

        let manifest: Box<dyn ManifestStore> = match self.manifest {
            Some(manifest) => manifest,
            None => Box::new(JsonManifestStore::new(
                config.manifest.clone(),
                config.manifest_options(),
            )),
        };
        let prober: Box<dyn ConnectivityProber> = match self.prober {
            Some(prober) => prober,
            None => match HttpProber::new() {
                Ok(prober) => Box::new(prober),
                Err(e) => {
                    tracing::warn!(error = %e, "HTTP prober unavailable");
                    Box::new(UnavailableProber {
                        reason: e.to_string(),
                    })
                }
            },
        };
        let registry = self.registry.unwrap_or_else(|| {
            let tool = CommandTool::new(config.executable.clone(), config.manifest_dir())
                .with_output(buffer.clone());
            ActionRegistry::for_tool(&tool)
        });
        let sink: Box<dyn DiagnosticSink> = match self.sink {
            Some(sink) => sink,
            None => Box::new(TracingSink),
        };
        let resolution: Box<dyn ResolutionStatus> = match self.resolution {
            Some(resolution) => resolution,
            None => Box::new(PlatformVersion::new(config.platform_version.clone())),
        };
        let output: Box<dyn OutputCapture> = match self.output {
            Some(output) => output,
            None => Box::new(buffer),
        };

        let mut manager = PackageManager {
            config,
            manifest,
            prober,
            registry,
            sink,
            resolution,
            output,
            messages: Vec::new(),
            requirements: IndexMap::new(),
            transport: Cell::new(TransportDecision::Unset),
            online: false,
            started: false,
        };
        manager.setup();
        manager
    }
}

/// Facade over the manifest, the registry and the action executors.
pub struct PackageManager {
    config: ExtendConfig,
    manifest: Box<dyn ManifestStore>,
    prober: Box<dyn ConnectivityProber>,
    registry: ActionRegistry,
    sink: Box<dyn DiagnosticSink>,
    resolution: Box<dyn ResolutionStatus>,
    output: Box<dyn OutputCapture>,
    messages: Vec<String>,
    requirements: IndexMap<String, String>,
    transport: Cell<TransportDecision>,
    online: bool,
    started: bool,
}

impl PackageManager {
    pub fn builder(config: ExtendConfig) -> PackageManagerBuilder {
        PackageManagerBuilder::new(config)
    }

    fn setup(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        if !self.config.writeable {
            tracing::debug!("Extension location is not writeable, skipping setup");
            return;
        }

        match self.manifest.update() {
            Ok(document) => {
                tracing::debug!(count = document.require.len(), "Loaded requirements");
                self.requirements = document.require;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Manifest update failed");
                let message = match &e {
                    ext_manifest::Error::Parse { message, .. } => message.clone(),
                    other => other.to_string(),
                };
                self.sink.emit(Severity::Danger, &message);
            }
        }

        self.use_ssl();
        self.ping();
    }

    fn ping(&mut self) {
        let request = ping_request(&self.config);
        match self.prober.probe(&request) {
            Ok(response) => {
                tracing::debug!(status = response.status, "Extension server reachable");
                self.online = true;
            }
            Err(failure) => {
                let message = classify(&failure);
                tracing::warn!("{}", message);
                self.messages.push(message);
            }
        }
    }

    /// Whether the registry is reached over `https`.
    ///
    /// Computed from the configured site on first call and cached.
    pub fn use_ssl(&self) -> bool {
        TransportDecision::resolve(&self.transport, &self.config.site)
    }

    /// Whether the setup ping succeeded.
    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Messages queued since construction, oldest first.
    pub fn get_messages(&self) -> &[String] {
        &self.messages
    }

    /// Output captured from the most recent actions.
    pub fn get_output(&self) -> String {
        self.output.output()
    }

    /// Requirements declared in the manifest at setup.
    pub fn requirements(&self) -> &IndexMap<String, String> {
        &self.requirements
    }

    pub fn config(&self) -> &ExtendConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ExtendConfig {
        &mut self.config
    }

    /// Write a fresh manifest to `path`.
    pub fn init_json(
        &self,
        path: &Path,
        options: &ManifestOptions,
    ) -> ext_manifest::Result<ManifestDocument> {
        self.manifest.init(path, options)
    }

    /// Every installed or required package with its status.
    pub fn get_all_packages(&self) -> Result<PackageStatusMap> {
        let listing = self.show_package(ShowQuery::installed())?;
        let installed = match listing {
            ActionResult::Installed(installed) => installed,
            other => {
                return Err(Error::UnexpectedActionResult {
                    action: ActionKind::Show,
                    result: format!("{:?}", other),
                });
            }
        };

        Ok(reconcile(
            &self.requirements,
            &installed,
            &*self.resolution,
        ))
    }

    fn dispatch(&self, kind: ActionKind, args: ActionArgs) -> ext_actions::Result<ActionResult> {
        self.registry.execute(kind, args)
    }

    /// Check whether the requirements can be resolved.
    pub fn check_package(&self) -> ext_actions::Result<ActionResult> {
        self.dispatch(ActionKind::Check, ActionArgs::None)
    }

    /// Which packages depend on `package`.
    pub fn depends_package(
        &self,
        package: Option<String>,
        constraint: Option<String>,
    ) -> ext_actions::Result<ActionResult> {
        self.dispatch(ActionKind::Depends, ActionArgs::Query { package, constraint })
    }

    pub fn dump_autoload(&self) -> ext_actions::Result<ActionResult> {
        self.dispatch(ActionKind::Autoload, ActionArgs::None)
    }

    pub fn install_packages(&self) -> ext_actions::Result<ActionResult> {
        self.dispatch(ActionKind::Install, ActionArgs::None)
    }

    /// Which packages prevent `package` at `constraint` from being installed.
    pub fn prohibits_package(
        &self,
        package: Option<String>,
        constraint: Option<String>,
    ) -> ext_actions::Result<ActionResult> {
        self.dispatch(
            ActionKind::Prohibits,
            ActionArgs::Query { package, constraint },
        )
    }

    pub fn remove_package(&self, packages: Vec<String>) -> ext_actions::Result<ActionResult> {
        self.dispatch(ActionKind::Remove, ActionArgs::Packages(packages))
    }

    pub fn require_package(&self, packages: Vec<String>) -> ext_actions::Result<ActionResult> {
        self.dispatch(ActionKind::Require, ActionArgs::Packages(packages))
    }

    pub fn search_package(&self, terms: Vec<String>) -> ext_actions::Result<ActionResult> {
        self.dispatch(ActionKind::Search, ActionArgs::Packages(terms))
    }

    pub fn show_package(&self, query: ShowQuery) -> ext_actions::Result<ActionResult> {
        self.dispatch(ActionKind::Show, ActionArgs::Show(query))
    }

    pub fn update_package(&self, packages: Vec<String>) -> ext_actions::Result<ActionResult> {
        self.dispatch(ActionKind::Update, ActionArgs::Packages(packages))
    }
}

impl std::fmt::Debug for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageManager")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("messages", &self.messages)
            .field("requirements", &self.requirements)
            .field("transport", &self.transport.get())
            .field("online", &self.online)
            .finish_non_exhaustive()
    }
}
