use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;

/// Environment variable naming the runner's step output file
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Step outputs of the action.
///
/// Values are appended as `name=value` lines to the runner's output file when
/// one is configured, and always kept in memory for the caller.
#[derive(Debug, Default)]
pub struct ActionOutputs {
    path: Option<PathBuf>,
    values: Vec<(String, String)>,
}

impl ActionOutputs {
    /// Outputs that are only kept in memory
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Outputs appended to the given file
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        ActionOutputs {
            path: Some(path.into()),
            values: Vec::new(),
        }
    }

    /// Outputs written to `$GITHUB_OUTPUT` when it is set and non-empty
    pub fn from_env() -> Self {
        match std::env::var_os(GITHUB_OUTPUT_ENV).filter(|p| !p.is_empty()) {
            Some(path) => Self::to_file(path),
            None => Self::in_memory(),
        }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        if let Some(path) = &self.path {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{}={}", name, value)?;
        }
        self.values.retain(|(existing, _)| existing != name);
        self.values.push((name.to_string(), value.to_string()));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn values(&self) -> &[(String, String)] {
        &self.values
    }
}
