pub mod actions;
pub mod cake;
pub mod cake_tool;
mod cli;
pub mod config;
pub mod dotnet;
pub mod error;
pub mod http;
pub mod inputs;
mod logging;
pub mod parameter;
pub mod process;
pub mod release;
pub mod tools_dir;

pub use cli::CliArgs;
pub use error::{Error, Result};

use actions::{EnvInputs, Environment, InputSource};
use cake::CakeToolSettings;
use config::Config;
use http::HttpClient;
use inputs::{ActionInputs, BuildFile, CakeBootstrap, CakeVersion};
use process::{Executor, ProcessRunner, SystemProcessRunner};
use release::{GithubReleaseLookup, ReleaseLookup};
use std::sync::Arc;

/// The action: resolve the inputs, install Cake if needed and run the build.
///
/// Processes are launched through a [`ProcessRunner`] and the latest Cake release is found
/// through a [`ReleaseLookup`], so the whole pipeline can be driven without a .NET SDK or network
/// access. `main.rs` only needs [`action_main`].
pub struct Action {
    config: Config,
    runner: Arc<dyn ProcessRunner>,
    release: Arc<dyn ReleaseLookup>,
}

impl Action {
    pub fn new(
        config: Config,
        runner: Arc<dyn ProcessRunner>,
        release: Arc<dyn ReleaseLookup>,
    ) -> Self {
        Self {
            config,
            runner,
            release,
        }
    }

    /// Run the action once with the given inputs.
    ///
    /// The first failing step ends the run; nothing is retried.
    pub fn run(&self, inputs: &dyn InputSource) -> Result<()> {
        let inputs = ActionInputs::load(inputs);
        tracing::debug!(?inputs, "Resolved action inputs");

        let mut env = Environment::new(self.config.env_file.clone());
        dotnet::disable_telemetry(&mut env)?;
        dotnet::disable_welcome_message(&mut env)?;

        let exec = Executor::new(self.runner.as_ref(), &env, &self.config.dotnet);
        let tools_dir = &self.config.tools_dir;

        match &inputs.build_file {
            BuildFile::Project { path } => {
                tools_dir.create()?;
                cake::run_project(&exec, path, &inputs.build_arguments)
            }
            BuildFile::File { path } => {
                tools_dir.create()?;
                cake::run_file(&exec, path, &inputs.build_arguments)
            }
            BuildFile::Script { path } => {
                let settings = CakeToolSettings::new(
                    Some(tools_dir.clone()),
                    inputs.cake_version == CakeVersion::ToolManifest,
                );

                tools_dir.create()?;
                cake_tool::install(&exec, self.release.as_ref(), tools_dir, &inputs.cake_version)?;

                if inputs.cake_bootstrap == CakeBootstrap::Explicit {
                    cake::bootstrap_script(&exec, path, &settings)?;
                }

                cake::run_script(&exec, path, &settings, &inputs.build_arguments)
            }
        }
    }
}

/// Main entry point of the `cake-action` binary.
///
/// Parses the command line, sets up logging and runs the [`Action`] with the inputs the runner
/// put into the environment.
pub fn action_main() -> Result<()> {
    let args = CliArgs::parse_from_cli_args();
    logging::init(&args);

    let config = Config::load(&args)?;
    let client = HttpClient::new(&config.http)?;
    let release = GithubReleaseLookup::new(client, config.release_url.clone());

    let action = Action::new(config, Arc::new(SystemProcessRunner), Arc::new(release));
    action.run(&EnvInputs::from_env())
}
