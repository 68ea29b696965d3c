//! # Scaffold CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`docker.rs`, `schema.rs`,
//! `main_tests.rs`). Each test file is compiled as its own crate and runs the
//! compiled `scaffold` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;

/// A minimal workspace with one application project at the root.
pub const WORKSPACE_JSON: &str = r#"{
  "version": 1,
  "defaultProject": "bar",
  "projects": {
    "bar": {
      "root": "",
      "projectType": "application",
      "architect": {
        "build": {
          "options": { "outputPath": "dist/bar" },
          "configurations": { "production": { "optimization": true } }
        }
      }
    }
  }
}"#;

/// # Get Scaffold Command (`scaffold_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `scaffold` binary.
/// `HOME` and `XDG_CONFIG_HOME` point at an empty directory under Cargo's
/// test scratch space, so the developer's own `config.toml` is never read.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn scaffold_cmd() -> Command {
    let home = Path::new(env!("CARGO_TARGET_TMPDIR")).join("scaffold-test-home");
    scaffold_cmd_with_home(&home)
}

/// Like [`scaffold_cmd`], with the user's home (and config dir below it) at `home`.
pub fn scaffold_cmd_with_home(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("scaffold").expect("Failed to find scaffold binary for testing");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("SCAFFOLD_SKIP_DOCKER_CHECK")
        .env_remove("SCAFFOLD_DOCKER_TEMPLATES");
    cmd
}

/// Writes `scaffold.json` and a `package.json` into `dir`.
pub fn write_workspace(dir: &Path) {
    fs::write(dir.join("scaffold.json"), WORKSPACE_JSON).expect("Failed to write scaffold.json");
    fs::write(
        dir.join("package.json"),
        r#"{"name": "bar", "scripts": {"build": "ng build"}}"#,
    )
    .expect("Failed to write package.json");
}
