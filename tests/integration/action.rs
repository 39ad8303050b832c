//! End-to-end runs of the action against a fake `dotnet`.
#![cfg(unix)]

use crate::utils::{CakeAction, UNUSED_RELEASE_URL};
use httpmock::prelude::*;
use predicates::prelude::*;

fn release_server(tag: &str) -> MockServer {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/releases/latest");
        then.status(200)
            .json_body(serde_json::json!({ "tag_name": tag }));
    });
    server
}

#[test]
fn default_run_installs_latest_cake_and_runs_build_cake() {
    let server = release_server("v1.2.3");
    let mut action = CakeAction::with_test_fs();

    action
        .release_url(&server.url("/releases/latest"))
        .cmd
        .assert()
        .success()
        .stderr(predicate::str::contains("[command]"));

    assert_eq!(
        action.test_fs().invocations(),
        vec![
            "dotnet tool install --version 1.2.3 --tool-path tools Cake.Tool",
            "dotnet-cake build.cake",
        ]
    );
    assert!(action.test_fs().cwd.path().join("tools").is_dir());
}

#[test]
fn dotnet_settings_are_exported_to_later_steps() {
    let server = release_server("v1.2.3");
    let mut action = CakeAction::with_test_fs();

    action
        .release_url(&server.url("/releases/latest"))
        .cmd
        .assert()
        .success();

    let exported = action.test_fs().exported();
    assert!(exported.contains("DOTNET_CLI_TELEMETRY_OPTOUT<<ghadelimiter_"));
    assert!(exported.contains("\n1\n"));
    assert!(exported.contains("DOTNET_NOLOGO<<ghadelimiter_"));
}

#[test]
fn inputs_are_forwarded_to_cake() {
    let server = release_server("v1.2.3");
    let mut action = CakeAction::with_test_fs();

    action
        .release_url(&server.url("/releases/latest"))
        .input("script-path", "ci/build.cake")
        .input("target", "Publish")
        .input("dry-run", "TRUE")
        .input("cake-bootstrap", "explicit")
        .input("arguments", "configuration: Release\nnot an argument\nurl: https://example.com")
        .cmd
        .assert()
        .success();

    assert_eq!(
        action.test_fs().invocations(),
        vec![
            "dotnet tool install --version 1.2.3 --tool-path tools Cake.Tool",
            "dotnet-cake ci/build.cake --bootstrap",
            "dotnet-cake ci/build.cake --target=Publish --dryrun --configuration=Release --url=https://example.com",
        ]
    );
}

#[test]
fn failed_release_lookup_installs_unpinned() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/releases/latest");
        then.status(500);
    });
    let mut action = CakeAction::with_test_fs();

    action
        .release_url(&server.url("/releases/latest"))
        .cmd
        .assert()
        .success()
        .stderr(predicate::str::contains("500"));

    mock.assert_calls(1);
    assert_eq!(
        action.test_fs().invocations()[0],
        "dotnet tool install --tool-path tools Cake.Tool"
    );
}

#[test]
fn tools_dir_can_be_configured() {
    let mut action = CakeAction::with_test_fs();

    action
        .release_url(UNUSED_RELEASE_URL)
        .input("cake-version", "2.0.0")
        .cmd
        .args(["--tools-dir", "./.cake//tools"])
        .assert()
        .success();

    assert_eq!(
        action.test_fs().invocations(),
        vec![
            "dotnet tool install --version 2.0.0 --tool-path .cake/tools Cake.Tool",
            "dotnet-cake build.cake",
        ]
    );
}

#[test]
fn tool_manifest_is_restored() {
    let mut action = CakeAction::with_test_fs();

    action
        .release_url(UNUSED_RELEASE_URL)
        .input("cake-version", "Tool-Manifest")
        .cmd
        .assert()
        .success();

    assert_eq!(
        action.test_fs().invocations(),
        vec!["dotnet tool restore", "dotnet tool run dotnet-cake build.cake"]
    );
}

#[test]
fn project_is_run_with_dotnet() {
    let mut action = CakeAction::with_test_fs();

    action
        .release_url(UNUSED_RELEASE_URL)
        .input("project-path", "build/Build.csproj")
        .input("verbosity", "Diagnostic")
        .cmd
        .assert()
        .success();

    assert_eq!(
        action.test_fs().invocations(),
        vec!["dotnet run --project build/Build.csproj -- --verbosity=Diagnostic"]
    );
}

#[test]
fn file_is_run_with_dotnet() {
    let mut action = CakeAction::with_test_fs();

    action
        .release_url(UNUSED_RELEASE_URL)
        .input("file-path", "build.cs")
        .cmd
        .assert()
        .success();

    assert_eq!(
        action.test_fs().invocations(),
        vec!["dotnet run build.cs --"]
    );
}

#[test]
fn failed_install_fails_the_step() {
    let mut action = CakeAction::with_test_fs();

    action
        .release_url(UNUSED_RELEASE_URL)
        .input("cake-version", "1.0.0")
        .cmd
        .env("FAKE_DOTNET_EXIT", "3")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "::error::Failed to install Cake.Tool. Exit code: 3",
        ));

    assert_eq!(action.test_fs().invocations().len(), 1);
}

#[test]
fn failed_build_fails_the_step() {
    let mut action = CakeAction::with_test_fs();

    action
        .release_url(UNUSED_RELEASE_URL)
        .input("cake-version", "1.0.0")
        .cmd
        .env("FAKE_CAKE_EXIT", "4")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "::error::Failed to run the build script build.cake. Exit code: 4",
        ));
}
