//! Error types for configuration operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable was absent from the environment snapshot.
    #[error("missing configuration variable {name}")]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
    },
    /// A variable was present but could not be interpreted.
    #[error("invalid configuration value")]
    InvalidValue {
        /// Name of the offending variable.
        name: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// The operating system random source could not supply entropy.
    #[error("secure random source unavailable")]
    EntropyUnavailable {
        /// Underlying random source error.
        source: rand::rand_core::OsError,
    },
    /// File system operation failed.
    #[error("filesystem operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
}

impl ConfigError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn missing_variable_names_the_key() {
        let err = ConfigError::MissingVariable {
            name: "JWT_SECRET".to_string(),
        };
        assert_eq!(err.to_string(), "missing configuration variable JWT_SECRET");
        assert!(err.source().is_none());
    }

    #[test]
    fn io_error_keeps_source_and_path() {
        let err = ConfigError::io("env_file.read", ".env", io::Error::other("denied"));
        assert_eq!(err.to_string(), "filesystem operation failed");
        assert!(err.source().is_some());
        match err {
            ConfigError::Io {
                operation, path, ..
            } => {
                assert_eq!(operation, "env_file.read");
                assert_eq!(path, PathBuf::from(".env"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
