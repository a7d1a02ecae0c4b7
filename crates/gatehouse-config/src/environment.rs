//! Immutable configuration snapshot assembled at process start.
//!
//! # Design
//! - Values come from the process environment layered over the env file; a
//!   variable already set in the process always wins over the file.
//! - The snapshot is passed explicitly to consumers instead of being read from
//!   global process state, so tests never mutate the real environment.
//! - Empty values are treated as unset.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{info, warn};

use crate::env_file::EnvFile;
use crate::error::{ConfigError, ConfigResult};

/// Read-only view over configuration variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Build a snapshot from explicit key/value pairs.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Capture the current process environment (non-UTF-8 entries are skipped).
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(key, value)| {
                    Some((key.into_string().ok()?, value.into_string().ok()?))
                })
                .collect(),
        }
    }

    /// Capture the process environment and fill gaps from the env file at `path`.
    ///
    /// A missing file is tolerated and logged.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read.
    pub fn hydrate(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_process().layered_with_file(&EnvFile::new(path.as_ref()))
    }

    /// Fill variables that are unset in `self` from `file`.
    ///
    /// When the file repeats a key, its last assignment is the one applied.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read.
    pub fn layered_with_file(mut self, file: &EnvFile) -> ConfigResult<Self> {
        let Some(content) = file.read()? else {
            warn!(
                path = %file.path().display(),
                "env file not found; using process environment only"
            );
            return Ok(self);
        };
        let from_file: BTreeMap<String, String> = crate::env_file::parse(&content)
            .into_iter()
            .map(|entry| (entry.key, entry.value))
            .collect();
        let mut applied = 0_usize;
        for (key, value) in from_file {
            if self.get(&key).is_none() {
                self.vars.insert(key, value);
                applied += 1;
            }
        }
        info!(path = %file.path().display(), applied, "env file loaded");
        Ok(self)
    }

    /// Value of `name`, treating empty strings as unset.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Value of `name`, or `default` when unset.
    #[must_use]
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// Value of `name`, failing when unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVariable` when the variable is unset or empty.
    pub fn require(&self, name: &str) -> ConfigResult<&str> {
        self.get(name).ok_or_else(|| ConfigError::MissingVariable {
            name: name.to_string(),
        })
    }

    /// Copy of the snapshot with `name` set to `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}
