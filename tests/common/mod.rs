//! Shared test utilities for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Creates a temporary repository directory containing `config` as
/// `.pre-commit-config.yaml`
pub fn create_test_repo(config: &str) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join(".pre-commit-config.yaml"), config)
        .expect("Failed to write config");
    temp_dir
}

/// Path of the config shipped at the crate root
pub fn shipped_config_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(".pre-commit-config.yaml")
}

/// Runs the `hookpin` binary in `dir`
pub fn run_hookpin(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hookpin"))
        .args(args)
        .current_dir(dir)
        .env_remove("SKIP")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to run hookpin {:?}: {}", args, e))
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
