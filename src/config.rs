use crate::{Result, cli::CliArgs, error, tools_dir::ToolsDirectory};
use snafu::ResultExt;
use std::{path::PathBuf, time::Duration};

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for outgoing HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Overall timeout of a single request
    pub timeout: Duration,

    /// Proxy URL, if requests should not go out directly
    pub proxy: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_HTTP_TIMEOUT,
            proxy: None,
        }
    }
}

/// Configuration of the action, resolved from the command line and the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where Cake.Tool is installed when it is not restored from a tool manifest
    pub tools_dir: ToolsDirectory,

    /// The dotnet executable
    pub dotnet: PathBuf,

    /// Release API endpoint queried for the latest version of Cake
    pub release_url: String,

    pub http: HttpConfig,

    /// File receiving exported environment variables, `$GITHUB_ENV` on a runner
    pub env_file: Option<PathBuf>,
}

impl Config {
    /// Resolve the configuration from the parsed command line.
    ///
    /// Fails if the HTTP timeout cannot be parsed or if no dotnet executable can be found.
    pub fn load(args: &CliArgs) -> Result<Self> {
        let timeout = humantime::parse_duration(&args.http_timeout).with_context(|_| {
            error::InvalidHttpTimeoutSnafu {
                value: args.http_timeout.clone(),
            }
        })?;

        let dotnet = match &args.dotnet {
            Some(path) => path.clone(),
            None => find_dotnet()?,
        };
        tracing::debug!("Using dotnet at {}", dotnet.display());

        Ok(Self {
            tools_dir: ToolsDirectory::new(&args.tools_dir),
            dotnet,
            release_url: args.release_url.clone(),
            http: HttpConfig {
                timeout,
                proxy: args.http_proxy.clone(),
            },
            env_file: args.env_file.clone(),
        })
    }
}

/// Find the dotnet executable on the PATH, falling back to the `DOTNET_ROOT` installation.
fn find_dotnet() -> Result<PathBuf> {
    const NAME: &str = "dotnet";

    if let Ok(path) = which::which(NAME) {
        return Ok(path);
    }

    if let Some(root) = std::env::var_os("DOTNET_ROOT") {
        let path = PathBuf::from(root).join(format!("{NAME}{}", std::env::consts::EXE_SUFFIX));
        if path.exists() {
            return Ok(path);
        }
    }

    error::ExecutableNotFoundSnafu { name: NAME }.fail()
}
