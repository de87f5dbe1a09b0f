//! Shared testing harness for `vpsboot` integration tests.

use assert_cmd::Command;
use assert_fs::TempDir;
use std::fs;
use std::path::{Path, PathBuf};

use super::FakeKeygen;

/// Isolated `$HOME`, working directory, and config for CLI exercises.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    config_path: PathBuf,
}

impl TestContext {
    /// Create an environment whose keypair generator is a fake script and
    /// whose container engine does not exist.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        let keygen = FakeKeygen::install(&root.path().join("bin"));
        let config_path = root.path().join("vpsboot.toml");
        let ctx = Self { root, work_dir, config_path };
        ctx.write_config(&format!(
            "[commands]\nkeypair = [\"{}\"]\ncompose = [\"vpsboot-test-missing-engine\"]\n",
            keygen.script.display()
        ));
        ctx
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub(crate) fn home(&self) -> &Path {
        self.root.path()
    }

    /// Directory CLI invocations run in.
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub(crate) fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Replace the config file passed through `$VPSBOOT_CONFIG`.
    pub(crate) fn write_config(&self, content: &str) {
        fs::write(&self.config_path, content).expect("Failed to write config");
    }

    /// Write an answers file into the work dir and return its path.
    pub(crate) fn write_answers(&self, content: &str) -> PathBuf {
        let path = self.work_dir.join("answers.toml");
        fs::write(&path, content).expect("Failed to write answers");
        path
    }

    /// Output directory for a run whose primary domain is `domain`.
    pub(crate) fn run_dir(&self, domain: &str) -> PathBuf {
        self.work_dir.join("vpsboot-out").join(domain)
    }

    pub(crate) fn read_output(&self, domain: &str, relative: &str) -> String {
        let path = self.run_dir(domain).join(relative);
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing output {}", path.display()))
    }

    /// Build a command for invoking the compiled `vpsboot` binary.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("vpsboot").expect("Failed to locate vpsboot binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.home())
            .env("VPSBOOT_CONFIG", &self.config_path)
            .env_remove("VPSBOOT_LOG");
        cmd
    }

    /// Run `render --answers <file> --no-launch` with `answers` and assert success.
    pub(crate) fn render_answers(&self, answers: &str) -> assert_cmd::assert::Assert {
        let path = self.write_answers(answers);
        self.cli()
            .args(["render", "--no-launch", "--answers"])
            .arg(&path)
            .assert()
            .success()
    }
}
