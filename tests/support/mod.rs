//! Test support utilities for secretsync integration tests.
//!
//! Provides an isolated environment for CLI runs and a fake GitHub API.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod github;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use github::{FakeGitHub, KEY_ID, TOKEN};

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Child processes get their own working and home directories, so tests can
/// run in parallel without touching the user's config.
pub struct Test {
    /// Working directory for the command
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Write a .env file into the working directory and return its path.
    pub fn env_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write env file");
        path
    }

    /// Write a config file into the working directory and return its path.
    pub fn config_file(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join("config.toml");
        std::fs::write(&path, contents).expect("failed to write config file");
        path
    }
}
