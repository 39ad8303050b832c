use crate::{
    Result, actions::Environment, error, process::Executor, tools_dir::ToolsDirectory,
};

pub const TELEMETRY_OPTOUT: &str = "DOTNET_CLI_TELEMETRY_OPTOUT";
pub const NOLOGO: &str = "DOTNET_NOLOGO";

/// Opt out of the .NET CLI telemetry for this step and the rest of the job.
pub fn disable_telemetry(env: &mut Environment) -> Result<()> {
    env.export_variable(TELEMETRY_OPTOUT, "1")
}

/// Suppress the first-run banner of the .NET CLI.
pub fn disable_welcome_message(env: &mut Environment) -> Result<()> {
    env.export_variable(NOLOGO, "1")
}

/// Install a dotnet tool package into `target_directory`, unless it is already there.
///
/// Without a version, any installed copy of the tool's executable is good enough. With a
/// version, the tool is left alone when that exact version is installed, and uninstalled first
/// when some other version is.
pub fn install_local_tool(
    exec: &Executor<'_>,
    package_id: &str,
    tool_name: &str,
    target_directory: &ToolsDirectory,
    version: Option<&str>,
) -> Result<()> {
    match version {
        None if target_directory.contains_tool(tool_name) => {
            tracing::info!(
                "The {package_id} already exists in {target_directory}, skipping installation"
            );
            return Ok(());
        }
        Some(version) if target_directory.contains_tool_with_version(package_id, version) => {
            tracing::info!(
                "The {package_id} version {version} already exists in {target_directory}, skipping installation"
            );
            return Ok(());
        }
        Some(version) if target_directory.contains_tool(tool_name) => {
            tracing::info!(
                "A different version of {package_id} exists in {target_directory}, replacing it with version {version}"
            );
            uninstall_local_tool(exec, package_id, target_directory)?;
        }
        _ => {}
    }

    let mut cmd = exec.dotnet().args(["tool", "install"]);
    if let Some(version) = version {
        cmd = cmd.args(["--version", version]);
    }
    let cmd = cmd
        .arg("--tool-path")
        .arg(target_directory.path())
        .arg(package_id);

    let exit_code = exec.exec(cmd)?;
    if exit_code != 0 {
        return error::InstallFailedSnafu {
            package_id,
            exit_code,
        }
        .fail();
    }

    Ok(())
}

pub fn uninstall_local_tool(
    exec: &Executor<'_>,
    package_id: &str,
    target_directory: &ToolsDirectory,
) -> Result<()> {
    let cmd = exec
        .dotnet()
        .args(["tool", "uninstall", "--tool-path"])
        .arg(target_directory.path())
        .arg(package_id);

    let exit_code = exec.exec(cmd)?;
    if exit_code != 0 {
        return error::UninstallFailedSnafu {
            package_id,
            exit_code,
        }
        .fail();
    }

    Ok(())
}

/// Restore the tools listed in the repository's dotnet tool manifest.
pub fn restore_local_tools(exec: &Executor<'_>) -> Result<()> {
    let exit_code = exec.exec(exec.dotnet().args(["tool", "restore"]))?;
    if exit_code != 0 {
        return error::RestoreFailedSnafu { exit_code }.fail();
    }

    Ok(())
}
