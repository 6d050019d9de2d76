//! Test support utilities for kiln integration tests.
//!
//! Provides an isolated project directory, a fake engine binary, and helper
//! commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own project directory and a bin directory that is
/// prepended to PATH for the fake engine. No process-global state is
/// mutated — child processes use `.current_dir()` so tests can run in
/// parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary directory holding the fake engine binary
    pub bin: TempDir,
}

impl Test {
    /// Create a project directory with a `.kiln.toml` and dbt marker file.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let bin = TempDir::new().expect("failed to create temp bin dir");

        std::fs::write(
            dir.path().join(".kiln.toml"),
            "[project]\nname = \"acme-analytics\"\n",
        )
        .expect("failed to write .kiln.toml");
        std::fs::write(dir.path().join("dbt_project.yml"), "name: acme_analytics\n")
            .expect("failed to write dbt_project.yml");

        Self { dir, bin }
    }

    /// Create a test environment with the fake engine installed.
    #[cfg(unix)]
    pub fn with_engine() -> Self {
        let t = Self::new();
        t.install_fake_engine();
        t
    }

    /// Write a fake `dbt` script that records its arguments and the
    /// connection variables it received, then exits with
    /// `$FAKE_ENGINE_EXIT` (default 0).
    #[cfg(unix)]
    pub fn install_fake_engine(&self) {
        use std::os::unix::fs::PermissionsExt;

        let script = r#"#!/bin/sh
printf '%s\n' "$*" > engine-args.txt
{
  printf 'ACCOUNT=%s\n' "$SNOWFLAKE_ACCOUNT"
  printf 'USER=%s\n' "$SNOWFLAKE_USER"
  printf 'ROLE=%s\n' "$SNOWFLAKE_ROLE"
  printf 'SCHEMA=%s\n' "$SNOWFLAKE_SCHEMA"
  printf 'DATABASE=%s\n' "$SNOWFLAKE_DATABASE"
  printf 'WAREHOUSE=%s\n' "$SNOWFLAKE_WAREHOUSE"
  printf 'PASSWORD=%s\n' "$SNOWFLAKE_PASSWORD"
  printf 'PRIVATE_KEY=%s\n' "$SNOWFLAKE_PRIVATE_KEY"
  printf 'TARGET=%s\n' "$DBT_TARGET"
  printf 'PROFILES_DIR=%s\n' "$DBT_PROFILES_DIR"
} > engine-env.txt
echo "engine: $*"
exit "${FAKE_ENGINE_EXIT:-0}"
"#;

        let path = self.bin.path().join("dbt");
        std::fs::write(&path, script).expect("failed to write fake engine");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("failed to chmod fake engine");
    }

    /// Read a file the fake engine wrote into the project directory.
    pub fn engine_file(&self, name: &str) -> Option<String> {
        std::fs::read_to_string(self.dir.path().join(name)).ok()
    }

    /// Whether the fake engine was invoked at all.
    pub fn engine_ran(&self) -> bool {
        self.dir.path().join("engine-args.txt").exists()
    }
}
