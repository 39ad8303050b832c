//! Utility functions to help run our binary as part of a test
use assert_cmd::Command;
use assert_fs::TempDir;

/// Environment variables of the host that would change how the binary behaves.
const HOST_VARS: &[&str] = &[
    "GITHUB_ENV",
    "RUNNER_DEBUG",
    "RUST_LOG",
    "CAKE_ACTION_LOG",
    "CAKE_ACTION_TOOLS_DIR",
    "CAKE_ACTION_DOTNET",
    "CAKE_ACTION_RELEASE_URL",
    "CAKE_ACTION_HTTP_TIMEOUT",
    "CAKE_ACTION_HTTP_PROXY",
];

/// Release URL that must never be contacted, for tests that do not look up a release.
pub(crate) const UNUSED_RELEASE_URL: &str = "http://127.0.0.1:1/unused";

/// Represents the `cake-action` binary for use in tests.
///
/// The `cmd` field provides helpers for running the binary and asserting on its output.
pub(crate) struct CakeAction {
    pub(crate) cmd: Command,
    pub(crate) test_fs: Option<TestFs>,
}

impl CakeAction {
    /// Creates a new `CakeAction` that locates the bin, isolated from the host's action
    /// environment.
    pub(crate) fn find() -> Self {
        let mut cmd = Command::cargo_bin("cake-action").expect("Failed to find cake-action binary");
        for var in HOST_VARS {
            cmd.env_remove(var);
        }

        Self { cmd, test_fs: None }
    }

    /// Run in a temporary working directory with a fake `dotnet` and a `GITHUB_ENV` file.
    #[cfg(unix)]
    pub(crate) fn with_test_fs() -> Self {
        let mut me = Self::find();
        let test_fs = TestFs::new();

        me.cmd
            .current_dir(test_fs.cwd.path())
            .env("CAKE_ACTION_DOTNET", test_fs.dotnet_path())
            .env("GITHUB_ENV", test_fs.env_file_path());
        me.test_fs = Some(test_fs);
        me
    }

    pub(crate) fn test_fs(&self) -> &TestFs {
        self.test_fs.as_ref().expect("test_fs not set")
    }

    /// Set an action input the way the runner does, as an `INPUT_*` variable.
    pub(crate) fn input(&mut self, name: &str, value: &str) -> &mut Self {
        self.cmd
            .env(format!("INPUT_{}", name.replace(' ', "_").to_uppercase()), value);
        self
    }

    pub(crate) fn release_url(&mut self, url: &str) -> &mut Self {
        self.cmd.env("CAKE_ACTION_RELEASE_URL", url);
        self
    }
}

/// Temporary directories and fake tools for one test run.
pub(crate) struct TestFs {
    pub(crate) cwd: TempDir,
    pub(crate) bin: TempDir,
}

#[cfg(unix)]
impl TestFs {
    /// Stand-in for `dotnet`. Every invocation is appended to the log; `tool install` also puts
    /// a fake `dotnet-cake` into the tool path, which logs its invocations the same way.
    const FAKE_DOTNET: &str = r#"#!/bin/sh
echo "dotnet $*" >> "__LOG__"
if [ "$1" = "tool" ] && [ "$2" = "install" ]; then
  while [ $# -gt 0 ]; do
    if [ "$1" = "--tool-path" ]; then
      tool_path="$2"
    fi
    shift
  done
  mkdir -p "$tool_path"
  printf '#!/bin/sh\necho "dotnet-cake $*" >> "__LOG__"\nexit ${FAKE_CAKE_EXIT:-0}\n' > "$tool_path/dotnet-cake"
  chmod +x "$tool_path/dotnet-cake"
fi
exit ${FAKE_DOTNET_EXIT:-0}
"#;

    fn new() -> Self {
        use std::os::unix::fs::PermissionsExt;

        let cwd = TempDir::with_prefix("cake-action-cwd-").unwrap();
        let bin = TempDir::with_prefix("cake-action-bin-").unwrap();

        let me = Self { cwd, bin };
        let script = Self::FAKE_DOTNET.replace("__LOG__", &me.log_path().display().to_string());
        std::fs::write(me.dotnet_path(), script).unwrap();
        std::fs::set_permissions(me.dotnet_path(), std::fs::Permissions::from_mode(0o755)).unwrap();

        me
    }

    pub(crate) fn dotnet_path(&self) -> std::path::PathBuf {
        self.bin.path().join("dotnet")
    }

    pub(crate) fn env_file_path(&self) -> std::path::PathBuf {
        self.bin.path().join("github_env")
    }

    fn log_path(&self) -> std::path::PathBuf {
        self.bin.path().join("invocations.log")
    }

    /// Every invocation of the fake tools, one per line.
    pub(crate) fn invocations(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Contents of the `GITHUB_ENV` file.
    pub(crate) fn exported(&self) -> String {
        std::fs::read_to_string(self.env_file_path()).unwrap_or_default()
    }
}
