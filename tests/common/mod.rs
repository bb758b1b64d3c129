//! Shared testing utilities for specboard CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const REFUND_SPEC: &str = r#"openapi: 3.0.0
info:
  title: Refund API
  version: 1.0.0
paths:
  /refunds:
    get:
      responses:
        '200':
          description: ok
"#;

const CREDENTIAL_VARS: &[&str] =
    &["POSTMAN_API_KEY", "POSTMAN_WORKSPACE_ID", "POSTMAN_API_URL", "SPEC_PATH", "RUST_LOG"];

/// Isolated working directory for CLI invocations.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Command for the compiled `specboard` binary with Postman variables cleared.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("specboard").expect("Failed to locate specboard binary");
        cmd.current_dir(&self.work_dir).env("HOME", self.root.path());
        for var in CREDENTIAL_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Write `content` to `relative` under the work directory, creating parents.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// `specboard.toml` with polling and cleanup delays disabled.
    pub fn write_fast_config(&self) -> PathBuf {
        self.write_file(
            "specboard.toml",
            "[postman]\nmax_retries = 1\nretry_delay_ms = 0\n\n\
             [generation]\npoll_attempts = 3\npoll_delay_ms = 0\ncleanup_delay_ms = 0\n",
        )
    }
}
