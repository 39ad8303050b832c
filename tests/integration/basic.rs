//! Very basic smoke tests that just confirm that the `cake-action` binary is able to run and
//! report failures the way the runner expects
use crate::utils::{CakeAction, UNUSED_RELEASE_URL};

/// Basic test, that `cake-action` runs at all, and that `--help` at least looks vaguely right.
#[test]
fn test_help_output() {
    let mut action = CakeAction::find();

    action
        .cmd
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("cake-action"))
        .stdout(predicates::str::contains("--tools-dir"))
        .stderr(predicates::str::is_empty());
}

#[test]
fn test_version_output() {
    let mut action = CakeAction::find();

    action
        .cmd
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::is_match(r"^cake-action \d+\.\d+\.\d+\n$").unwrap());
}

/// Configuration errors fail the step with an `::error::` workflow command.
#[test]
fn invalid_http_timeout_fails_the_step() {
    let mut action = CakeAction::find();

    action
        .cmd
        .args(["--dotnet", "dotnet", "--http-timeout", "whenever"])
        .env("CAKE_ACTION_RELEASE_URL", UNUSED_RELEASE_URL)
        .assert()
        .code(1)
        .stdout(predicates::str::starts_with(
            "::error::Invalid HTTP timeout 'whenever'",
        ));
}
