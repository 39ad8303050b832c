use crate::{release::DEFAULT_RELEASE_URL, tools_dir::DEFAULT_TOOLS_DIR};
use clap::Parser;
use std::path::PathBuf;

/// Command line of the `cake-action` binary.
///
/// The action's own inputs (script path, Cake version, arguments, ...) are not flags; they are
/// read from the `INPUT_*` variables the runner sets. Everything here has an environment
/// fallback so the binary can be run without arguments from an action step.
#[derive(Debug, Parser)]
#[command(name = "cake-action")]
#[command(about = "Install Cake and run a build script, project or file with it")]
#[command(version)]
pub struct CliArgs {
    /// Directory into which Cake.Tool is installed
    #[arg(
        long,
        env = "CAKE_ACTION_TOOLS_DIR",
        value_name = "DIR",
        default_value = DEFAULT_TOOLS_DIR
    )]
    pub tools_dir: PathBuf,

    /// Path to the dotnet executable (default: found on PATH or in $DOTNET_ROOT)
    #[arg(long, env = "CAKE_ACTION_DOTNET", value_name = "PATH")]
    pub dotnet: Option<PathBuf>,

    /// Endpoint describing the latest release of Cake
    #[arg(
        long,
        env = "CAKE_ACTION_RELEASE_URL",
        value_name = "URL",
        default_value = DEFAULT_RELEASE_URL
    )]
    pub release_url: String,

    /// Timeout for HTTP requests (e.g. "30s", "2m")
    #[arg(
        long,
        env = "CAKE_ACTION_HTTP_TIMEOUT",
        value_name = "DURATION",
        default_value = "30s"
    )]
    pub http_timeout: String,

    /// Proxy for HTTP requests
    #[arg(long, env = "CAKE_ACTION_HTTP_PROXY", value_name = "URL")]
    pub http_proxy: Option<String>,

    /// File to which exported environment variables are appended
    #[arg(long, env = "GITHUB_ENV", value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Use verbose output (-vv for trace output)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    /// Parse the arguments of the current process, exiting with usage help if they are invalid.
    pub fn parse_from_cli_args() -> Self {
        Self::parse()
    }
}
