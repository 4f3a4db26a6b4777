use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub struct CliOutput {
    pub stdout: String,
    #[allow(dead_code)]
    pub stderr: String,
}

/// Runs the CLI in script mode against a private home directory.
pub struct ScriptHarness {
    home: TempDir,
}

impl ScriptHarness {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    #[allow(dead_code)]
    pub fn catalog_path(&self) -> PathBuf {
        self.home().join("data").join("catalog.json")
    }

    #[allow(dead_code)]
    pub fn catalog(&self) -> String {
        std::fs::read_to_string(self.catalog_path()).expect("catalog written")
    }

    pub fn run_script(&self, script: &str) -> CliOutput {
        let mut cmd = Command::cargo_bin("batch_entry_cli").expect("binary exists");
        cmd.env("BATCH_ENTRY_HOME", self.home())
            .env("BATCH_ENTRY_CLI_SCRIPT", "1")
            .env_remove("RUST_LOG")
            .write_stdin(script.to_string());
        let output = cmd.output().expect("run script CLI");
        if !output.status.success() {
            panic!(
                "script CLI failed: status={}\nstdout:\n{}\nstderr:\n{}",
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
