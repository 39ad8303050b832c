use crate::{
    actions::{self, InputSource},
    parameter::CakeParameter,
};
use strum::{Display, EnumString, VariantNames};

/// The default Cake script, as per Cake's convention.
pub const DEFAULT_SCRIPT: &str = "build.cake";

/// Names of the inputs declared by the action.
pub mod names {
    pub const SCRIPT_PATH: &str = "script-path";
    pub const PROJECT_PATH: &str = "project-path";
    pub const FILE_PATH: &str = "file-path";
    pub const CAKE_VERSION: &str = "cake-version";
    pub const CAKE_BOOTSTRAP: &str = "cake-bootstrap";
    pub const DRY_RUN: &str = "dry-run";
    pub const TARGET: &str = "target";
    pub const VERBOSITY: &str = "verbosity";
    pub const ARGUMENTS: &str = "arguments";
}

/// What Cake should build.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuildFile {
    /// A Cake script, run by the `dotnet-cake` tool.
    Script { path: String },

    /// A Cake Frosting project, run with `dotnet run --project`.
    Project { path: String },

    /// A single C# file, run with `dotnet run`.
    File { path: String },
}

impl BuildFile {
    pub fn path(&self) -> &str {
        match self {
            Self::Script { path } | Self::Project { path } | Self::File { path } => path,
        }
    }
}

impl Default for BuildFile {
    fn default() -> Self {
        Self::Script {
            path: DEFAULT_SCRIPT.to_string(),
        }
    }
}

/// Which version of `Cake.Tool` to use.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CakeVersion {
    /// Restore the version pinned in the repository's dotnet tool manifest.
    ToolManifest,

    /// The latest released version.
    #[default]
    Latest,

    /// Exactly this version, passed through to `dotnet tool install` as given.
    Specific { number: String },
}

impl CakeVersion {
    /// Interpret the raw `cake-version` input. Only the keywords are matched ignoring case;
    /// a specific version keeps the casing of the input.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.to_lowercase().as_str() {
            "tool-manifest" => Self::ToolManifest,
            "latest" | "" => Self::Latest,
            _ => Self::Specific {
                number: raw.to_string(),
            },
        }
    }
}

/// Whether and how Cake should bootstrap the script before running it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum CakeBootstrap {
    /// Let Cake decide; no separate bootstrap step is run.
    #[default]
    Auto,

    /// Run `--bootstrap` as a separate step before the build.
    Explicit,

    /// Pass `--skip-bootstrap` to the build.
    Skip,
}

impl CakeBootstrap {
    /// Interpret the raw `cake-bootstrap` input, falling back to [`CakeBootstrap::Auto`] for
    /// anything unrecognized.
    pub fn parse(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }
}

/// Everything the action needs to know, resolved from its raw inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionInputs {
    pub build_file: BuildFile,
    pub cake_version: CakeVersion,
    pub cake_bootstrap: CakeBootstrap,
    pub build_arguments: Vec<CakeParameter>,
}

impl ActionInputs {
    /// Resolve the inputs. This never fails: missing or malformed values fall back to their
    /// defaults or are dropped.
    pub fn load(inputs: &dyn InputSource) -> Self {
        let cake_bootstrap = CakeBootstrap::parse(&inputs.get_input(names::CAKE_BOOTSTRAP));

        Self {
            build_file: load_build_file(inputs),
            cake_version: CakeVersion::parse(&inputs.get_input(names::CAKE_VERSION)),
            cake_bootstrap,
            build_arguments: load_build_arguments(inputs, cake_bootstrap),
        }
    }
}

/// Pick the build file. A project wins over a file, which wins over a script; without any of
/// them Cake's default script is used.
fn load_build_file(inputs: &dyn InputSource) -> BuildFile {
    let project_path = inputs.get_input(names::PROJECT_PATH);
    let file_path = inputs.get_input(names::FILE_PATH);
    let script_path = inputs.get_input(names::SCRIPT_PATH);

    if !project_path.is_empty() {
        BuildFile::Project { path: project_path }
    } else if !file_path.is_empty() {
        BuildFile::File { path: file_path }
    } else if !script_path.is_empty() {
        BuildFile::Script { path: script_path }
    } else {
        BuildFile::default()
    }
}

fn load_build_arguments(inputs: &dyn InputSource, bootstrap: CakeBootstrap) -> Vec<CakeParameter> {
    let mut params = vec![
        CakeParameter::argument("target", inputs.get_input(names::TARGET)),
        CakeParameter::argument("verbosity", inputs.get_input(names::VERBOSITY)),
    ];

    if bootstrap == CakeBootstrap::Skip {
        params.push(CakeParameter::switch("skip-bootstrap"));
    }

    if actions::get_boolean_input(inputs, names::DRY_RUN) {
        params.push(CakeParameter::switch("dryrun"));
    }

    params.extend(parse_custom_arguments(
        inputs.get_multiline_input(names::ARGUMENTS),
    ));
    params
}

/// Parse `name: value` lines into Cake arguments.
///
/// Each line is split on its first colon, so values may contain colons themselves (URLs,
/// drive letters). Lines without a colon, or with nothing but whitespace on either side of it,
/// are ignored.
pub fn parse_custom_arguments<I, S>(lines: I) -> Vec<CakeParameter>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            parse_name_and_value(line.as_ref())
                .map(|(name, value)| CakeParameter::argument(name, value))
        })
        .collect()
}

/// Parse arguments given as one block of text, one `name: value` pair per line.
pub fn parse_custom_arguments_text(text: &str) -> Vec<CakeParameter> {
    parse_custom_arguments(actions::split_lines(text))
}

fn parse_name_and_value(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    let (name, value) = (name.trim(), value.trim());

    if name.is_empty() || value.is_empty() {
        return None;
    }

    Some((name, value))
}
