use snafu::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum Error {
    // dotnet tool management
    #[snafu(display("Failed to install {package_id}. Exit code: {exit_code}"))]
    InstallFailed { package_id: String, exit_code: i32 },

    #[snafu(display("Failed to uninstall {package_id}. Exit code: {exit_code}"))]
    UninstallFailed { package_id: String, exit_code: i32 },

    #[snafu(display("Failed to restore the local tools from the tool manifest. Exit code: {exit_code}"))]
    RestoreFailed { exit_code: i32 },

    // Cake invocation
    #[snafu(display("Failed to run the build script {script}. Exit code: {exit_code}"))]
    RunScriptFailed { script: String, exit_code: i32 },

    #[snafu(display("Failed to bootstrap the build script {script}. Exit code: {exit_code}"))]
    BootstrapFailed { script: String, exit_code: i32 },

    #[snafu(display("Failed to run the build project {project}. Exit code: {exit_code}"))]
    RunProjectFailed { project: String, exit_code: i32 },

    #[snafu(display("Failed to run the build file {file}. Exit code: {exit_code}"))]
    RunFileFailed { file: String, exit_code: i32 },

    // Process execution
    #[snafu(display("Failed to spawn process {}: {source}", program.display()))]
    SpawnFailed { program: PathBuf, source: std::io::Error },

    #[snafu(display("Process {} was terminated before reporting an exit code", program.display()))]
    ProcessTerminated { program: PathBuf },

    #[snafu(display("Executable '{name}' not found in PATH or standard locations"))]
    ExecutableNotFound { name: String },

    // Filesystem and environment
    #[snafu(display("{}: {}", path.display(), source))]
    Io { path: PathBuf, source: std::io::Error },

    #[snafu(display("Failed to write exported variables to {}: {source}", path.display()))]
    EnvFile { path: PathBuf, source: std::io::Error },

    // HTTP client configuration
    #[snafu(display("Failed to build HTTP client: {message}"))]
    HttpClientBuild { message: String },

    #[snafu(display("Invalid HTTP timeout '{value}': {source}"))]
    InvalidHttpTimeout {
        value: String,
        source: humantime::DurationError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
