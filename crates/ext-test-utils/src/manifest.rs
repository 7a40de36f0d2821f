//! [`StubManifest`]: an in-memory [`ManifestStore`].

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use ext_manifest::{Error, ManifestDocument, ManifestOptions, ManifestStore, Result};

#[derive(Debug, Clone)]
enum Behaviour {
    Document(ManifestDocument),
    Corrupt(String),
}

/// A manifest store that returns a fixed document (or parse failure) and
/// records how it was called.
///
/// # Example
///
/// ```rust
/// use ext_manifest::ManifestStore;
/// use ext_test_utils::StubManifest;
///
/// let store = StubManifest::with_requirements([("vendor/a", "^3.0")]);
/// let document = store.update().unwrap();
/// assert_eq!(document.require["vendor/a"], "^3.0");
/// assert_eq!(store.update_calls(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct StubManifest {
    behaviour: Behaviour,
    update_calls: Rc<Cell<usize>>,
    init_calls: Rc<RefCell<Vec<(PathBuf, ManifestOptions)>>>,
}

impl Default for StubManifest {
    fn default() -> Self {
        Self::with_document(ManifestDocument::default())
    }
}

impl StubManifest {
    pub fn with_document(document: ManifestDocument) -> Self {
        Self {
            behaviour: Behaviour::Document(document),
            update_calls: Rc::new(Cell::new(0)),
            init_calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A manifest whose `require` section holds `requirements` in order.
    pub fn with_requirements<I, N, C>(requirements: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        let mut document = ManifestDocument::default();
        document.require = requirements
            .into_iter()
            .map(|(name, constraint)| (name.into(), constraint.into()))
            .collect();
        Self::with_document(document)
    }

    /// A manifest whose `update` fails with a parse error carrying `message`.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self {
            behaviour: Behaviour::Corrupt(message.into()),
            ..Self::default()
        }
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.get()
    }

    pub fn init_calls(&self) -> Vec<(PathBuf, ManifestOptions)> {
        self.init_calls.borrow().clone()
    }

    fn document(&self) -> Result<ManifestDocument> {
        match &self.behaviour {
            Behaviour::Document(document) => Ok(document.clone()),
            Behaviour::Corrupt(message) => Err(Error::Parse {
                path: PathBuf::from("composer.json"),
                message: message.clone(),
            }),
        }
    }
}

impl ManifestStore for StubManifest {
    fn update(&self) -> Result<ManifestDocument> {
        self.update_calls.set(self.update_calls.get() + 1);
        self.document()
    }

    fn init(&self, path: &Path, options: &ManifestOptions) -> Result<ManifestDocument> {
        self.init_calls
            .borrow_mut()
            .push((path.to_path_buf(), options.clone()));
        Ok(ManifestDocument::bootstrap(options))
    }
}
