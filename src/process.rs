//! Execution of external processes.
//!
//! Everything this action does beyond reading inputs happens by shelling out to `dotnet` or to
//! Cake itself. The [`ProcessRunner`] trait is the seam between deciding what to run and actually
//! running it, so that the decisions can be tested without a .NET SDK on the machine.

use crate::{Result, actions::Environment, error};
use snafu::{OptionExt, ResultExt};
use std::{
    ffi::{OsStr, OsString},
    fmt,
    path::{Path, PathBuf},
    process::Command,
};

/// A fully specified process invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub envs: Vec<(String, String)>,
}

impl CommandLine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((name.into(), value.into()));
        self
    }

    /// The arguments as lossily converted strings, mostly useful in assertions.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs external processes to completion.
pub trait ProcessRunner: std::fmt::Debug {
    /// Run the command, inheriting stdio, and return its exit code.
    ///
    /// Only failures to launch or wait for the process are errors; a non-zero exit code is
    /// returned as-is and interpreted by the caller.
    fn run(&self, command: &CommandLine) -> Result<i32>;
}

/// [`ProcessRunner`] that spawns real processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, command: &CommandLine) -> Result<i32> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        cmd.envs(command.envs.iter().map(|(k, v)| (k, v)));

        let status = cmd.status().with_context(|_| error::SpawnFailedSnafu {
            program: command.program.clone(),
        })?;

        status.code().with_context(|| error::ProcessTerminatedSnafu {
            program: command.program.clone(),
        })
    }
}

/// Everything needed to launch a process on behalf of the action: the runner, the environment
/// variables exported so far, and the location of `dotnet`.
#[derive(Clone, Copy, Debug)]
pub struct Executor<'a> {
    runner: &'a dyn ProcessRunner,
    env: &'a Environment,
    dotnet: &'a Path,
}

impl<'a> Executor<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, env: &'a Environment, dotnet: &'a Path) -> Self {
        Self { runner, env, dotnet }
    }

    /// Start a command line for the `dotnet` executable.
    pub fn dotnet(&self) -> CommandLine {
        CommandLine::new(self.dotnet)
    }

    /// Run the command with the exported environment applied, returning its exit code.
    pub fn exec(&self, command: CommandLine) -> Result<i32> {
        let command = self
            .env
            .vars()
            .fold(command, |cmd, (name, value)| cmd.env(name, value));

        tracing::info!("[command]{command}");
        let exit_code = self.runner.run(&command)?;
        tracing::debug!("{} exited with code {exit_code}", command.program.display());

        Ok(exit_code)
    }
}
