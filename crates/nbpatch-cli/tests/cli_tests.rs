//! Integration tests for the nbpatch CLI
//!
//! Each test builds a small notebook tree in a temp directory and runs the
//! real binary against it.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a CLI command
fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nbpatch"))
}

/// Write a minimal one-code-cell notebook with the given source, cell
/// metadata, and captured outputs
fn write_notebook(dir: &Path, name: &str, source: &str, metadata: Value, outputs: Value) {
    let doc = json!({
        "cells": [
            {
                "cell_type": "code",
                "metadata": metadata,
                "execution_count": 1,
                "source": source,
                "outputs": outputs
            }
        ],
        "metadata": {
            "kernelspec": {"name": "python3", "display_name": "Python 3"}
        },
        "nbformat": 4,
        "nbformat_minor": 5
    });
    fs::write(dir.join(name), serde_json::to_string_pretty(&doc).unwrap()).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Patch Jupyter notebooks for CI test execution",
        ));
}

#[test]
fn test_patches_demo_notebook() {
    let dir = TempDir::new().unwrap();
    write_notebook(
        dir.path(),
        "demo.ipynb",
        "epochs = 15",
        json!({"test_replace": {"epochs = 15": "epochs = 1"}}),
        json!([{"output_type": "stream", "name": "stdout", "text": ["training...\n"]}]),
    );

    cli()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed"))
        .stdout(predicate::str::contains("epochs = 15 -> epochs = 1"));

    let out = dir.path().join("test_demo.ipynb");
    assert!(out.exists());

    let doc = read_json(&out);
    let cell = &doc["cells"][0];
    assert_eq!(cell["source"], "# Modified for testing\nepochs = 1");
    assert_eq!(cell["outputs"], json!([]));
    assert_eq!(cell["execution_count"], Value::Null);

    // The input is never mutated in place
    let original = read_json(&dir.path().join("demo.ipynb"));
    assert_eq!(original["cells"][0]["source"], "epochs = 15");
}

#[test]
fn test_notebook_without_metadata_is_copied_with_note() {
    let dir = TempDir::new().unwrap();
    write_notebook(
        dir.path(),
        "no_meta.ipynb",
        "x = 1\n",
        json!({}),
        json!([{"output_type": "execute_result", "execution_count": 1,
                "data": {"text/plain": "1"}, "metadata": {}}]),
    );

    cli()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No replacements found for"))
        .stdout(predicate::str::contains("no_meta.ipynb"));

    let doc = read_json(&dir.path().join("test_no_meta.ipynb"));
    assert_eq!(doc["cells"][0]["source"], "x = 1\n");
    assert_eq!(doc["cells"][0]["outputs"], json!([]));
}

#[test]
fn test_missing_target_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    write_notebook(
        dir.path(),
        "bad.ipynb",
        "x = 1",
        json!({"test_replace": {"foo": "bar"}}),
        json!([]),
    );

    cli()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.ipynb"))
        .stderr(predicate::str::contains("foo"));

    assert!(!dir.path().join("test_bad.ipynb").exists());
}

#[test]
fn test_nonexistent_root_fails_before_scan() {
    cli()
        .arg("/definitely/not/a/real/dir")
        .assert()
        .failure()
        .stderr(predicate::str::contains("/definitely/not/a/real/dir"))
        .stderr(predicate::str::contains("is not an existing directory"));
}

#[test]
fn test_skips_generated_and_excluded_notebooks() {
    let dir = TempDir::new().unwrap();
    write_notebook(dir.path(), "test_old.ipynb", "x = 1", json!({}), json!([]));
    write_notebook(
        dir.path(),
        "data-preparation-ct-scan.ipynb",
        "x = 1",
        json!({}),
        json!([]),
    );

    cli().arg(dir.path()).assert().success();

    // Neither file is a candidate, so nothing new appears
    assert!(!dir.path().join("test_test_old.ipynb").exists());
    assert!(!dir
        .path()
        .join("test_data-preparation-ct-scan.ipynb")
        .exists());
}

#[test]
fn test_recurses_into_subdirectories() {
    let dir = TempDir::new().unwrap();
    let sub = dir.path().join("101-hello-world");
    fs::create_dir(&sub).unwrap();
    write_notebook(
        &sub,
        "hello.ipynb",
        "steps = 100",
        json!({"test_replace": {"steps = 100": "steps = 2"}}),
        json!([]),
    );

    cli().arg(dir.path()).assert().success();

    let doc = read_json(&sub.join("test_hello.ipynb"));
    assert_eq!(doc["cells"][0]["source"], "# Modified for testing\nsteps = 2");
}

#[test]
fn test_defaults_to_current_directory() {
    let dir = TempDir::new().unwrap();
    write_notebook(dir.path(), "local.ipynb", "x = 1", json!({}), json!([]));

    cli()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No replacements found for"));

    assert!(dir.path().join("test_local.ipynb").exists());
}

#[test]
fn test_quiet_mode_suppresses_log_lines() {
    let dir = TempDir::new().unwrap();
    write_notebook(
        dir.path(),
        "demo.ipynb",
        "epochs = 15",
        json!({"test_replace": {"epochs = 15": "epochs = 1"}}),
        json!([]),
    );

    cli()
        .arg("-q")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(dir.path().join("test_demo.ipynb").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_notebook(
        dir.path(),
        "demo.ipynb",
        "epochs = 15",
        json!({"test_replace": {"epochs = 15": "epochs = 1"}}),
        json!([]),
    );

    cli()
        .arg("--dry-run")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Would write"));

    assert!(!dir.path().join("test_demo.ipynb").exists());
}

#[test]
fn test_overwrites_stale_test_copy() {
    let dir = TempDir::new().unwrap();
    write_notebook(dir.path(), "demo.ipynb", "x = 1", json!({}), json!([]));
    fs::write(dir.path().join("test_demo.ipynb"), "stale").unwrap();

    cli().arg(dir.path()).assert().success();

    let doc = read_json(&dir.path().join("test_demo.ipynb"));
    assert_eq!(doc["cells"][0]["source"], "x = 1");
}

#[test]
fn test_malformed_notebook_fails_with_path() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.ipynb"), "{not valid json").unwrap();

    cli()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.ipynb"));
}
