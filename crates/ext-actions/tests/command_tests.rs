//! CommandExecutor tests against a scripted stand-in for the package tool.
//!
//! Everything runs inside one test so no other thread forks while the script
//! file is being written.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;

use ext_actions::{
    ActionArgs, ActionKind, ActionRegistry, ActionResult, CommandTool, ExecutorError,
    OutputCapture, ShowQuery,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const FAKE_TOOL: &str = r#"#!/bin/sh
echo "$@" >> calls.log
case "$1" in
    show)
        echo '{"installed":[{"name":"vendor/a","version":"1.2.3"},{"name":"vendor/c","version":"2.4.6"}]}'
        ;;
    search)
        echo '[{"name":"vendor/gallery","description":"Image galleries"}]'
        ;;
    install)
        echo "Nothing to install, update or remove" >&2
        ;;
    update)
        echo "Your requirements could not be resolved" >&2
        exit 2
        ;;
esac
exit 0
"#;

#[test]
fn scripted_tool_round_trip() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("fake-composer");
    fs::write(&script, FAKE_TOOL).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let tool = CommandTool::locate(script.to_str().unwrap(), temp.path()).unwrap();
    let registry = ActionRegistry::for_tool(&tool);

    // show lists installed packages as records
    let shown = registry
        .execute(ActionKind::Show, ActionArgs::Show(ShowQuery::installed()))
        .unwrap();
    let ActionResult::Installed(packages) = shown else {
        panic!("expected installed listing, got {shown:?}");
    };
    let names: Vec<&str> = packages.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["vendor/a", "vendor/c"]);

    // search output is passed through as structured JSON
    let found = registry
        .execute(
            ActionKind::Search,
            ActionArgs::Packages(vec!["gallery".to_string()]),
        )
        .unwrap();
    assert!(matches!(found, ActionResult::Value(ref v) if v[0]["name"] == "vendor/gallery"));

    // stderr lands in the shared output buffer
    let installed = registry
        .execute(ActionKind::Install, ActionArgs::None)
        .unwrap();
    assert_eq!(installed, ActionResult::ExitCode(0));
    assert!(tool.output().output().contains("Nothing to install"));

    // non-zero exit codes of mutating actions are results, not errors
    let updated = registry
        .execute(
            ActionKind::Update,
            ActionArgs::Packages(vec!["vendor/a".to_string()]),
        )
        .unwrap();
    assert_eq!(updated, ActionResult::ExitCode(2));
    assert!(!updated.is_success());

    let calls = fs::read_to_string(temp.path().join("calls.log")).unwrap();
    let calls: Vec<&str> = calls.lines().collect();
    assert_eq!(
        calls,
        vec![
            "show --format=json",
            "search --format=json gallery",
            "install --no-interaction",
            "update --no-interaction vendor/a",
        ]
    );

    // a missing program surfaces as a spawn failure
    let missing = CommandTool::new(temp.path().join("absent-tool"), temp.path());
    let err = ActionRegistry::for_tool(&missing)
        .execute(ActionKind::Install, ActionArgs::None)
        .unwrap_err();
    assert!(matches!(err, ExecutorError::Spawn { .. }));
}
