//! Test helpers for colbind CLI tests
//!
//! This module provides helper functions and structs to simplify
//! writing command-line tests for the colbind binary.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Represents a test case for colbind
pub struct ColbindTestCase {
    /// Subcommand and its options, placed before the input files
    pub args: Vec<String>,
    /// Input files as (file name, CSV content), created in a temp directory
    pub files: Vec<(String, String)>,
    /// Options placed after the input files
    pub trailing_args: Vec<String>,
    /// Expected exact stdout, if any
    pub expected_output: Option<String>,
    /// Expected strings in stdout
    pub expected_stdout: Vec<String>,
    /// Expected strings in stderr
    pub expected_stderr: Vec<String>,
    /// Whether the command is expected to succeed
    pub should_succeed: bool,
    /// Whether to use verbose mode
    pub verbose: bool,
}

impl Default for ColbindTestCase {
    fn default() -> Self {
        ColbindTestCase {
            args: Vec::new(),
            files: Vec::new(),
            trailing_args: Vec::new(),
            expected_output: None,
            expected_stdout: Vec::new(),
            expected_stderr: Vec::new(),
            should_succeed: true,
            verbose: false,
        }
    }
}

/// Run a test case with its input files written to a fresh temp directory
pub fn run_test_case(test_case: ColbindTestCase) -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;

    let mut cmd = Command::cargo_bin("colbind")?;
    cmd.env_remove("RUST_LOG");
    cmd.args(&test_case.args);

    for (name, content) in &test_case.files {
        let path = create_custom_csv(temp_dir.path(), name, content)?;
        cmd.arg(path);
    }
    cmd.args(&test_case.trailing_args);

    if test_case.verbose {
        cmd.arg("-v");
    }

    let mut assert = cmd.assert();

    if test_case.should_succeed {
        assert = assert.success();
    } else {
        assert = assert.failure();
    }

    if let Some(expected) = test_case.expected_output {
        assert = assert.stdout(expected);
    }

    for expected in test_case.expected_stdout {
        assert = assert.stdout(predicate::str::contains(expected));
    }

    for expected in test_case.expected_stderr {
        assert = assert.stderr(predicate::str::contains(expected));
    }

    Ok(())
}

/// Helper function to create a temp directory for tests, respecting CARGO_TARGET_TMPDIR if set
pub fn create_temp_dir() -> Result<TempDir, Box<dyn std::error::Error>> {
    if let Ok(cargo_target_tmpdir) = env::var("CARGO_TARGET_TMPDIR") {
        fs::create_dir_all(&cargo_target_tmpdir)?;
        Ok(TempDir::new_in(cargo_target_tmpdir)?)
    } else {
        Ok(TempDir::new()?)
    }
}

/// Helper function to create a test CSV file with custom data
pub fn create_custom_csv(
    dir: &Path,
    filename: &str,
    content: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Shorthand for an input file entry
pub fn csv_file(name: &str, content: &str) -> (String, String) {
    (name.to_string(), content.to_string())
}

/// Shorthand for a list of arguments
pub fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
