//! Diagnostic sinks for absorbed setup failures

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Severity of a diagnostic message, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Danger,
    Error,
    Warning,
    Info,
    Success,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives human-readable diagnostics. Fire-and-forget.
pub trait DiagnosticSink {
    fn emit(&self, severity: Severity, message: &str);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Danger | Severity::Error => {
                tracing::error!(severity = %severity, "{}", message)
            }
            Severity::Warning => tracing::warn!(severity = %severity, "{}", message),
            Severity::Info | Severity::Success => {
                tracing::info!(severity = %severity, "{}", message)
            }
        }
    }
}

/// Collects diagnostics in memory for later display.
///
/// Clones share the same bag, so a host can keep one handle while the
/// manager owns another.
#[derive(Debug, Clone, Default)]
pub struct FlashBag {
    entries: Rc<RefCell<Vec<(Severity, String)>>>,
}

impl FlashBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries, oldest first, without removing them.
    pub fn peek(&self) -> Vec<(Severity, String)> {
        self.entries.borrow().clone()
    }

    /// Messages of one severity, oldest first.
    pub fn of(&self, severity: Severity) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Remove and return all entries.
    pub fn drain(&self) -> Vec<(Severity, String)> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl DiagnosticSink for FlashBag {
    fn emit(&self, severity: Severity, message: &str) {
        self.entries
            .borrow_mut()
            .push((severity, message.to_string()));
    }
}
