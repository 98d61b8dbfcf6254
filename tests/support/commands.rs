//! Command helper methods for Test.

use super::{FakeGitHub, Test, TOKEN};
use assert_cmd::Command;
use std::path::Path;
use std::process::Output;

impl Test {
    /// Create a secretsync command with an isolated environment.
    ///
    /// HOME and the config directories point into the temp home, and no
    /// token or config override leaks in from the caller's environment.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("secretsync").expect("failed to find secretsync binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("GITHUB_TOKEN");
        cmd.env_remove("SECRETSYNC_CONFIG");
        cmd.env_remove("SECRETSYNC_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// A command aimed at `fake` with a valid token.
    pub fn against(&self, fake: &FakeGitHub) -> Command {
        let mut cmd = self.cmd();
        cmd.env("GITHUB_TOKEN", TOKEN);
        cmd.args(["--api-url", fake.url()]);
        cmd
    }

    /// Shortcut for `secretsync secrets push`.
    pub fn push(&self, fake: &FakeGitHub, repo: &str, file: &Path) -> Output {
        self.against(fake)
            .args(["secrets", "push", repo])
            .arg(file)
            .output()
            .expect("failed to run secretsync secrets push")
    }

    /// Shortcut for `secretsync secrets push --dry-run`.
    pub fn push_dry_run(&self, fake: &FakeGitHub, repo: &str, file: &Path) -> Output {
        self.against(fake)
            .args(["secrets", "push", repo])
            .arg(file)
            .arg("--dry-run")
            .output()
            .expect("failed to run secretsync secrets push --dry-run")
    }

    /// Shortcut for `secretsync secrets push --merge`.
    pub fn push_merge(&self, fake: &FakeGitHub, repo: &str, file: &Path) -> Output {
        self.against(fake)
            .args(["secrets", "push", repo])
            .arg(file)
            .arg("--merge")
            .output()
            .expect("failed to run secretsync secrets push --merge")
    }

    /// Shortcut for `secretsync secrets list`.
    pub fn list(&self, fake: &FakeGitHub, repo: &str) -> Output {
        self.against(fake)
            .args(["secrets", "list", repo])
            .output()
            .expect("failed to run secretsync secrets list")
    }

    /// Shortcut for `secretsync secrets list --json`.
    pub fn list_json(&self, fake: &FakeGitHub, repo: &str) -> Output {
        self.against(fake)
            .args(["secrets", "list", repo, "--json"])
            .output()
            .expect("failed to run secretsync secrets list --json")
    }
}
