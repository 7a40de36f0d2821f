//! Action kinds, arguments and results

use std::fmt;
use std::str::FromStr;

use crate::error::ExecutorError;
use crate::package::InstalledPackage;

/// The ten package operations an executor can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    Check,
    Depends,
    Autoload,
    Install,
    Prohibits,
    Remove,
    Require,
    Search,
    Show,
    Update,
}

/// Fixed action-to-key bindings.
const BINDINGS: [(ActionKind, &str); 10] = [
    (ActionKind::Check, "check"),
    (ActionKind::Depends, "depends"),
    (ActionKind::Autoload, "autoload"),
    (ActionKind::Install, "install"),
    (ActionKind::Prohibits, "prohibits"),
    (ActionKind::Remove, "remove"),
    (ActionKind::Require, "require"),
    (ActionKind::Search, "search"),
    (ActionKind::Show, "show"),
    (ActionKind::Update, "update"),
];

impl ActionKind {
    /// Every action kind, in binding-table order.
    pub const ALL: [ActionKind; 10] = [
        ActionKind::Check,
        ActionKind::Depends,
        ActionKind::Autoload,
        ActionKind::Install,
        ActionKind::Prohibits,
        ActionKind::Remove,
        ActionKind::Require,
        ActionKind::Search,
        ActionKind::Show,
        ActionKind::Update,
    ];

    /// The registry key this action is bound to.
    pub fn key(self) -> &'static str {
        BINDINGS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, key)| *key)
            .unwrap_or_default()
    }

    pub fn from_key(key: &str) -> Option<Self> {
        BINDINGS
            .iter()
            .find(|(_, k)| *k == key)
            .map(|(kind, _)| *kind)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ActionKind {
    type Err = ExecutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| ExecutorError::UnknownAction(s.to_string()))
    }
}

/// Which package set a `show` action lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowTarget {
    /// Packages installed from the manifest
    #[default]
    Installed,
    /// Packages available from the configured repositories
    Available,
    /// Platform packages provided by the host
    Platform,
    /// The root package described by the manifest itself
    Root,
}

/// Arguments of a `show` action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowQuery {
    pub target: ShowTarget,
    pub package: Option<String>,
    pub version: Option<String>,
}

impl ShowQuery {
    pub fn installed() -> Self {
        Self::default()
    }
}

/// Arguments handed to [`Executor::execute`](crate::Executor::execute).
///
/// The shape depends on the action: `check`, `autoload` and `install` take
/// [`ActionArgs::None`]; `depends` and `prohibits` take a
/// [`ActionArgs::Query`]; `remove`, `require`, `search` and `update` take
/// [`ActionArgs::Packages`]; `show` takes [`ActionArgs::Show`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionArgs {
    None,
    Query {
        package: Option<String>,
        constraint: Option<String>,
    },
    Packages(Vec<String>),
    Show(ShowQuery),
}

/// What an executor hands back.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// Exit status of the underlying tool
    ExitCode(i32),
    /// Installed package listing from `show`
    Installed(Vec<InstalledPackage>),
    /// Structured output the executor does not interpret
    Value(serde_json::Value),
    /// A bare success flag
    Flag(bool),
}

impl ActionResult {
    /// Whether the result reports success.
    pub fn is_success(&self) -> bool {
        match self {
            Self::ExitCode(code) => *code == 0,
            Self::Flag(flag) => *flag,
            Self::Installed(_) | Self::Value(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_unique_key() {
        let mut keys: Vec<&str> = ActionKind::ALL.iter().map(|k| k.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), ActionKind::ALL.len());
    }

    #[test]
    fn key_round_trips_through_from_str() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.key().parse::<ActionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn autoload_is_bound_to_autoload_key() {
        assert_eq!(ActionKind::Autoload.key(), "autoload");
        assert_eq!(ActionKind::Autoload.to_string(), "autoload");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = "dump-autoload".parse::<ActionKind>().unwrap_err();
        assert!(matches!(err, ExecutorError::UnknownAction(ref s) if s == "dump-autoload"));
    }

    #[test]
    fn exit_code_success() {
        assert!(ActionResult::ExitCode(0).is_success());
        assert!(!ActionResult::ExitCode(2).is_success());
        assert!(!ActionResult::Flag(false).is_success());
    }
}
