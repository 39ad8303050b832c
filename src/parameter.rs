use std::fmt;

/// A single parameter forwarded to Cake on its command line.
///
/// Parameters are built from the action inputs and consumed by exactly one Cake invocation.
/// A parameter with an empty name (or, for arguments, an empty value) is invalid; invalid
/// parameters format to the empty string and are left out of the command line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CakeParameter {
    /// A named argument, formatted as `--name=value`.
    Argument { name: String, value: String },

    /// A boolean switch, formatted as `--name`.
    Switch { name: String },
}

impl CakeParameter {
    pub fn argument(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Argument {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn switch(name: impl Into<String>) -> Self {
        Self::Switch { name: name.into() }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Self::Argument { name, value } => !name.is_empty() && !value.is_empty(),
            Self::Switch { name } => !name.is_empty(),
        }
    }

    /// Format the parameter the way Cake expects it, or return an empty string if the
    /// parameter is not valid.
    pub fn format(&self) -> String {
        if !self.is_valid() {
            return String::new();
        }

        match self {
            Self::Argument { name, value } => format!("--{name}={value}"),
            Self::Switch { name } => format!("--{name}"),
        }
    }
}

impl fmt::Display for CakeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Format the valid parameters in order, dropping the invalid ones.
pub fn format_parameters(params: &[CakeParameter]) -> Vec<String> {
    params
        .iter()
        .filter(|p| p.is_valid())
        .map(CakeParameter::format)
        .collect()
}
