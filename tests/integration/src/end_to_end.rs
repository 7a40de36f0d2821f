//! End-to-end tests with the shipped collaborators
//!
//! Exercises the complete flow: manifest reload on disk -> registry ping over
//! HTTP -> installed listing from a package tool -> reconciliation.

use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;

use ext_core::{ExtendConfig, FlashBag, PackageManager, PackageStatus, Severity};
use ext_manifest::ManifestDocument;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Serve one HTTP request with `status_line`, returning the site URL.
fn serve_once(status_line: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut received = Vec::new();
        let mut buf = [0u8; 1024];
        while !received.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => received.extend_from_slice(&buf[..n]),
            }
        }
        let response =
            format!("HTTP/1.1 {status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        let _ = stream.write_all(response.as_bytes());
    });

    format!("http://{addr}/")
}

fn write_manifest(dir: &Path, content: &str) {
    fs::write(dir.join("composer.json"), content).unwrap();
}

fn config(dir: &Path, site: String) -> ExtendConfig {
    ExtendConfig {
        writeable: true,
        site,
        manifest: dir.join("composer.json"),
        platform_version: "1.4.0".to_string(),
        executable: dir.join("missing-tool").display().to_string(),
        ..ExtendConfig::default()
    }
}

#[test]
fn setup_rewrites_manifest_and_goes_online() {
    let temp = TempDir::new().unwrap();
    write_manifest(
        temp.path(),
        r#"{ "license": "MIT", "require": { "vendor/a": "^3.0", "vendor/b": "^4.0" } }"#,
    );
    let site = serve_once("200 OK");

    let manager = PackageManager::builder(config(temp.path(), site.clone())).build();

    assert!(manager.is_online());
    assert!(!manager.use_ssl());
    assert!(manager.get_messages().is_empty());

    let names: Vec<&str> = manager.requirements().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["vendor/a", "vendor/b"]);

    let written = fs::read_to_string(temp.path().join("composer.json")).unwrap();
    let document = ManifestDocument::parse(&written).unwrap();
    assert_eq!(
        document.repositories.get("extend").map(|r| r.url),
        Some(format!("{site}satis/"))
    );
    assert_eq!(document.provide["extend/platform"], "1.4.0");
    assert_eq!(document.extra["license"], "MIT");
}

#[test]
fn server_error_is_queued_once() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), r#"{ "require": {} }"#);
    let site = serve_once("503 Service Unavailable");

    let manager = PackageManager::builder(config(temp.path(), site)).build();

    assert!(!manager.is_online());
    assert_eq!(manager.get_messages().len(), 1);
    assert!(
        manager.get_messages()[0].starts_with("Extension server returned an error: "),
        "{:?}",
        manager.get_messages()
    );
}

#[test]
fn corrupt_manifest_is_flashed_and_left_alone() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), "{ \"require\": ");
    let site = serve_once("200 OK");
    let flashes = FlashBag::new();

    let manager = PackageManager::builder(config(temp.path(), site))
        .sink(flashes.clone())
        .build();

    assert_eq!(flashes.of(Severity::Danger).len(), 1);
    assert!(manager.requirements().is_empty());
    assert!(manager.is_online());
    assert_eq!(
        fs::read_to_string(temp.path().join("composer.json")).unwrap(),
        "{ \"require\": "
    );
}

#[test]
fn unreachable_server_is_a_transport_failure() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), r#"{ "require": {} }"#);
    // bind then drop to get a port nothing listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let manager =
        PackageManager::builder(config(temp.path(), format!("http://127.0.0.1:{port}/"))).build();

    assert_eq!(manager.get_messages().len(), 1);
    assert!(
        manager.get_messages()[0].starts_with("Testing connection to extension server failed: ")
    );
}

#[cfg(unix)]
#[test]
fn installed_listing_is_reconciled_with_requirements() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    write_manifest(
        temp.path(),
        r#"{ "require": { "vendor/a": "^3.0", "vendor/b": "^4.0" } }"#,
    );
    let tool = temp.path().join("fake-composer");
    fs::write(
        &tool,
        "#!/bin/sh\necho '{\"installed\":[{\"name\":\"vendor/a\",\"version\":\"1.2.3\"},{\"name\":\"vendor/c\",\"version\":\"2.4.6\"}]}'\n",
    )
    .unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

    let site = serve_once("200 OK");
    let config = ExtendConfig {
        executable: tool.display().to_string(),
        ..config(temp.path(), site)
    };
    let manager = PackageManager::builder(config).build();

    let packages = manager.get_all_packages().unwrap();

    let names: Vec<&str> = packages.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["vendor/a", "vendor/c", "vendor/b"]);
    assert_eq!(packages["vendor/a"].status, PackageStatus::Installed);
    assert_eq!(packages["vendor/a"].constraint.as_deref(), Some("1.4.0"));
    assert_eq!(packages["vendor/b"].status, PackageStatus::Pending);
    assert!(manager.get_output().contains("vendor/c"));

    let json = serde_json::to_value(&packages).unwrap();
    assert_eq!(json["vendor/b"]["description"], "Not yet installed.");
}
