//! The small slice of the GitHub Actions runner protocol that this action needs.
//!
//! The runner hands inputs to the step through `INPUT_*` environment variables, accepts
//! exported variables through the file named by `GITHUB_ENV`, and recognizes workflow commands
//! such as `::error::` written to stdout.

use crate::{Result, error};
use snafu::ResultExt;
use std::{
    collections::{BTreeMap, HashMap},
    io::Write,
    path::PathBuf,
};

/// Source of the raw, string-valued inputs of the action.
///
/// An empty string means "not provided"; implementations never fail.
pub trait InputSource {
    /// The value of a single-line input, trimmed, or an empty string if it is absent.
    fn get_input(&self, name: &str) -> String;

    /// The non-empty lines of an input, each trimmed.
    fn get_multiline_input(&self, name: &str) -> Vec<String> {
        split_lines(&self.get_input(name))
    }
}

/// `true` only when the input is the string `true`, ignoring case.
pub fn get_boolean_input(inputs: &dyn InputSource, name: &str) -> bool {
    inputs.get_input(name).eq_ignore_ascii_case("true")
}

/// Split text on line breaks (`\n` or `\r\n`), trimming each line and dropping empty ones.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Name of the environment variable in which the runner stores an input.
///
/// `script-path` becomes `INPUT_SCRIPT-PATH`: the name is upper-cased, spaces turn into
/// underscores and hyphens are kept.
pub fn input_variable_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Inputs read from `INPUT_*` environment variables, the way the runner provides them.
#[derive(Clone, Debug, Default)]
pub struct EnvInputs {
    vars: HashMap<String, String>,
}

impl EnvInputs {
    /// Snapshot the inputs present in the environment of the current process.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build the inputs from an explicit set of environment variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k.starts_with("INPUT_"))
            .collect();

        Self { vars }
    }
}

impl InputSource for EnvInputs {
    fn get_input(&self, name: &str) -> String {
        self.vars
            .get(&input_variable_name(name))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }
}

/// Inputs held in memory, keyed by input name.
#[derive(Clone, Debug, Default)]
pub struct StaticInputs {
    values: HashMap<String, String>,
}

impl StaticInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl InputSource for StaticInputs {
    fn get_input(&self, name: &str) -> String {
        self.values
            .get(name)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }
}

/// Environment variables exported by this step.
///
/// Exported variables are passed to every process this action spawns and, when the runner
/// provides a `GITHUB_ENV` file, appended to it so later steps of the job see them too. The
/// environment of the action process itself is left untouched.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    vars: BTreeMap<String, String>,
    env_file: Option<PathBuf>,
}

impl Environment {
    pub fn new(env_file: Option<PathBuf>) -> Self {
        Self {
            vars: BTreeMap::new(),
            env_file,
        }
    }

    pub fn export_variable(&mut self, name: &str, value: &str) -> Result<()> {
        tracing::debug!("Exporting {name}={value}");

        if let Some(path) = &self.env_file {
            let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|_| error::EnvFileSnafu { path: path.clone() })?;
            write!(file, "{name}<<{delimiter}\n{value}\n{delimiter}\n")
                .with_context(|_| error::EnvFileSnafu { path: path.clone() })?;
        }

        self.vars.insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Escape a message for use as the data of a workflow command.
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Format the workflow command that marks the step as failed.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Report the failure of the step to the runner.
///
/// The caller is responsible for exiting with a non-zero status afterwards.
pub fn set_failed(message: &str) {
    println!("{}", error_command(message));
}
