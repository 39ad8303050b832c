use crate::{Result, error};
use snafu::ResultExt;
use std::{
    fmt,
    path::{Component, Path, PathBuf},
};

/// Name of the directory into which local tools are installed when none is configured.
pub const DEFAULT_TOOLS_DIR: &str = "tools";

/// File that dotnet writes into the store directory of every installed tool version.
const PACKAGE_METADATA: &str = "project.assets.json";

/// A directory used as the `--tool-path` of `dotnet tool install`.
///
/// The path is normalized lexically on construction: `.` components and duplicate separators
/// are removed, `..` components are kept.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ToolsDirectory {
    path: PathBuf,
}

impl ToolsDirectory {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: normalize(path.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory, including any missing parents. Succeeds if it already exists.
    pub fn create(&self) -> Result<()> {
        std::fs::create_dir_all(&self.path).with_context(|_| error::IoSnafu {
            path: self.path.clone(),
        })
    }

    /// Join a file name onto the directory. Leading separators in the name are ignored, so the
    /// result always stays inside the directory.
    pub fn append(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name.trim_start_matches(['/', '\\']))
    }

    pub fn contains_file(&self, file_name: &str) -> bool {
        self.append(file_name).exists()
    }

    pub fn contains_file_in(&self, file_name: &str, subdirectory: &str) -> bool {
        self.append(subdirectory).join(file_name).exists()
    }

    /// Whether the executable of a tool is present, accounting for the `.exe` suffix on
    /// Windows.
    pub fn contains_tool(&self, tool_name: &str) -> bool {
        self.contains_file(&executable_name(tool_name))
    }

    /// Whether a specific version of a tool package has been installed here.
    ///
    /// dotnet keeps every installed package under `.store/<package>/<version>/`, with both
    /// components lower-cased.
    pub fn contains_tool_with_version(&self, package_id: &str, version: &str) -> bool {
        let store = Path::new(".store")
            .join(package_id.to_lowercase())
            .join(version.to_lowercase());

        self.path.join(store).join(PACKAGE_METADATA).exists()
    }
}

impl Default for ToolsDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_TOOLS_DIR)
    }
}

impl fmt::Display for ToolsDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Platform-specific file name of an executable.
pub fn executable_name(tool_name: &str) -> String {
    format!("{tool_name}{}", std::env::consts::EXE_SUFFIX)
}

fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}
