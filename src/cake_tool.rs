use crate::{
    Result, dotnet, inputs::CakeVersion, process::Executor, release::ReleaseLookup,
    tools_dir::ToolsDirectory,
};

/// NuGet package that provides the Cake runner.
pub const PACKAGE_ID: &str = "Cake.Tool";

/// Name of the executable installed by [`PACKAGE_ID`].
pub const TOOL_NAME: &str = "dotnet-cake";

/// Make the requested version of Cake available.
///
/// With a tool manifest, the manifest is restored. Otherwise `Cake.Tool` is installed into
/// `tools_dir`: the latest release as reported by `release`, or the given version. If the latest
/// release cannot be determined the package source decides which version to install.
pub fn install(
    exec: &Executor<'_>,
    release: &dyn ReleaseLookup,
    tools_dir: &ToolsDirectory,
    version: &CakeVersion,
) -> Result<()> {
    match version {
        CakeVersion::ToolManifest => dotnet::restore_local_tools(exec),
        CakeVersion::Latest => {
            let latest = release.latest_version();
            if latest.is_none() {
                tracing::info!("Installing Cake without a pinned version");
            }
            install_cake_local_tool(exec, tools_dir, latest.as_deref())
        }
        CakeVersion::Specific { number } => {
            install_cake_local_tool(exec, tools_dir, Some(number.as_str()))
        }
    }
}

fn install_cake_local_tool(
    exec: &Executor<'_>,
    tools_dir: &ToolsDirectory,
    version: Option<&str>,
) -> Result<()> {
    dotnet::install_local_tool(exec, PACKAGE_ID, TOOL_NAME, tools_dir, version)
}
