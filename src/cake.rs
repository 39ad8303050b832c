use crate::{
    Result,
    cake_tool::TOOL_NAME,
    error,
    parameter::{CakeParameter, format_parameters},
    process::{CommandLine, Executor},
    tools_dir::{ToolsDirectory, executable_name},
};
use snafu::OptionExt;

/// Where to find the Cake runner for a script.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CakeToolSettings {
    /// Directory the tool was installed into, if it was installed locally.
    pub tools_dir: Option<ToolsDirectory>,

    /// Run Cake through `dotnet tool run`, as restored from the tool manifest.
    pub use_tool_manifest: bool,
}

impl CakeToolSettings {
    pub fn new(tools_dir: Option<ToolsDirectory>, use_tool_manifest: bool) -> Self {
        Self {
            tools_dir,
            use_tool_manifest,
        }
    }

    /// The command that starts Cake, before any script or parameters.
    fn cake_command(&self, exec: &Executor<'_>) -> Result<CommandLine> {
        if self.use_tool_manifest {
            return Ok(exec.dotnet().args(["tool", "run", TOOL_NAME]));
        }

        match &self.tools_dir {
            Some(dir) => Ok(CommandLine::new(dir.append(&executable_name(TOOL_NAME)))),
            None => {
                // Installed globally, so it must be on the PATH
                let path = which::which(TOOL_NAME)
                    .ok()
                    .context(error::ExecutableNotFoundSnafu { name: TOOL_NAME })?;
                Ok(CommandLine::new(path))
            }
        }
    }
}

/// Run a Cake script with the given parameters. Invalid parameters are left out.
pub fn run_script(
    exec: &Executor<'_>,
    script_path: &str,
    settings: &CakeToolSettings,
    params: &[CakeParameter],
) -> Result<()> {
    let cmd = settings
        .cake_command(exec)?
        .arg(script_path)
        .args(format_parameters(params));

    let exit_code = exec.exec(cmd)?;
    if exit_code != 0 {
        return error::RunScriptFailedSnafu {
            script: script_path,
            exit_code,
        }
        .fail();
    }

    Ok(())
}

/// Let the script resolve its modules and add-ins before it is run.
pub fn bootstrap_script(
    exec: &Executor<'_>,
    script_path: &str,
    settings: &CakeToolSettings,
) -> Result<()> {
    let cmd = settings
        .cake_command(exec)?
        .arg(script_path)
        .arg("--bootstrap");

    let exit_code = exec.exec(cmd)?;
    if exit_code != 0 {
        return error::BootstrapFailedSnafu {
            script: script_path,
            exit_code,
        }
        .fail();
    }

    Ok(())
}

/// Run a Cake Frosting project with `dotnet run --project`.
pub fn run_project(exec: &Executor<'_>, project_path: &str, params: &[CakeParameter]) -> Result<()> {
    let cmd = exec
        .dotnet()
        .args(["run", "--project", project_path, "--"])
        .args(format_parameters(params));

    let exit_code = exec.exec(cmd)?;
    if exit_code != 0 {
        return error::RunProjectFailedSnafu {
            project: project_path,
            exit_code,
        }
        .fail();
    }

    Ok(())
}

/// Run a single-file Cake program with `dotnet run`.
pub fn run_file(exec: &Executor<'_>, file_path: &str, params: &[CakeParameter]) -> Result<()> {
    let cmd = exec
        .dotnet()
        .args(["run", file_path, "--"])
        .args(format_parameters(params));

    let exit_code = exec.exec(cmd)?;
    if exit_code != 0 {
        return error::RunFileFailedSnafu {
            file: file_path,
            exit_code,
        }
        .fail();
    }

    Ok(())
}
