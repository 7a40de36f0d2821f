//! Executor and output doubles plus installed-package fixtures.

use std::cell::RefCell;
use std::rc::Rc;

use ext_actions::{
    ActionArgs, ActionResult, Executor, InstalledPackage, OutputCapture, PackageMetadata, Result,
};

/// An executor returning a fixed result and recording its arguments.
#[derive(Debug, Clone)]
pub struct RecordingExecutor {
    result: ActionResult,
    calls: Rc<RefCell<Vec<ActionArgs>>>,
}

impl RecordingExecutor {
    pub fn returning(result: ActionResult) -> Self {
        Self {
            result,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A `show` executor listing `packages`.
    pub fn listing(packages: Vec<InstalledPackage>) -> Self {
        Self::returning(ActionResult::Installed(packages))
    }

    pub fn calls(&self) -> Vec<ActionArgs> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Executor for RecordingExecutor {
    fn execute(&self, args: ActionArgs) -> Result<ActionResult> {
        self.calls.borrow_mut().push(args);
        Ok(self.result.clone())
    }
}

/// Output capture returning a fixed string.
#[derive(Debug, Clone, Default)]
pub struct StaticOutput(pub String);

impl OutputCapture for StaticOutput {
    fn output(&self) -> String {
        self.0.clone()
    }
}

/// An installed package with no type, authors or keywords.
pub fn installed(name: &str, pretty_version: &str) -> InstalledPackage {
    InstalledPackage::new(PackageMetadata::new(name, pretty_version))
}
