//! Error types for engine resolution and provisioning.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;
use std::path::PathBuf;

use crate::descriptor::EngineKind;

/// Result alias for data layer operations.
pub type DataResult<T> = std::result::Result<T, DataError>;

/// Errors raised by the data layer.
#[derive(Debug)]
pub enum DataError {
    /// The configured engine name is not registered.
    UnsupportedEngine {
        /// Name as configured.
        engine: String,
        /// Names that would have been accepted.
        supported: Vec<&'static str>,
    },
    /// A mandatory connection setting is unset.
    MissingCredential {
        /// Variable that must be provided.
        name: &'static str,
    },
    /// A connection setting has an unusable value.
    InvalidSetting {
        /// Variable holding the value.
        name: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// `DB_URL` could not be interpreted.
    InvalidUrl {
        /// What is wrong with it.
        reason: &'static str,
        /// Parser error, when the URL is syntactically invalid.
        source: Option<url::ParseError>,
    },
    /// The database server refused or failed the connection.
    ServerUnreachable {
        /// Engine being contacted.
        engine: EngineKind,
        /// Underlying client error.
        source: sqlx::Error,
    },
    /// A catalog lookup or DDL statement failed.
    QueryFailed {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying SQL error.
        source: sqlx::Error,
    },
    /// Filesystem preparation failed.
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl Display for DataError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedEngine { engine, supported } => write!(
                formatter,
                "unsupported database engine '{engine}' (supported: {})",
                supported.join(", ")
            ),
            Self::MissingCredential { name } => {
                write!(formatter, "missing database setting {name}")
            }
            Self::InvalidSetting { name, reason } => {
                write!(formatter, "invalid database setting {name}: {reason}")
            }
            Self::InvalidUrl { reason, .. } => write!(formatter, "invalid DB_URL: {reason}"),
            Self::ServerUnreachable { engine, .. } => {
                write!(formatter, "{engine} server is unreachable")
            }
            Self::QueryFailed { .. } => formatter.write_str("database operation failed"),
            Self::Io { .. } => formatter.write_str("filesystem operation failed"),
        }
    }
}

impl Error for DataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidUrl {
                source: Some(source),
                ..
            } => Some(source),
            Self::ServerUnreachable { source, .. } | Self::QueryFailed { source, .. } => {
                Some(source)
            }
            Self::Io { source, .. } => Some(source),
            Self::UnsupportedEngine { .. }
            | Self::MissingCredential { .. }
            | Self::InvalidSetting { .. }
            | Self::InvalidUrl { source: None, .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_engine_lists_supported_names() {
        let err = DataError::UnsupportedEngine {
            engine: "oracle".to_string(),
            supported: vec!["sqlite", "mysql"],
        };
        assert_eq!(
            err.to_string(),
            "unsupported database engine 'oracle' (supported: sqlite, mysql)"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn wrapped_errors_expose_sources() {
        let query = DataError::QueryFailed {
            operation: "mysql.schema_lookup",
            source: sqlx::Error::RowNotFound,
        };
        assert_eq!(query.to_string(), "database operation failed");
        assert!(query.source().is_some());

        let unreachable = DataError::ServerUnreachable {
            engine: EngineKind::Postgres,
            source: sqlx::Error::PoolClosed,
        };
        assert_eq!(unreachable.to_string(), "postgres server is unreachable");
        assert!(unreachable.source().is_some());

        let url = DataError::InvalidUrl {
            reason: "missing host",
            source: None,
        };
        assert_eq!(url.to_string(), "invalid DB_URL: missing host");
        assert!(url.source().is_none());
    }
}
