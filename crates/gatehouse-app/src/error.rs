//! # Design
//!
//! - Centralize errors raised while bringing the process up.
//! - Keep messages constant and carry the failing operation as a field.

use std::io;

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// A mandatory configuration variable was unset.
    #[error("missing environment configuration")]
    MissingEnv {
        /// Name of the missing variable.
        name: &'static str,
    },
    /// Configuration loading failed.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: gatehouse_config::ConfigError,
    },
    /// Telemetry installation failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: gatehouse_telemetry::TelemetryError,
    },
    /// Storage resolution, provisioning, or connection failed.
    #[error("storage operation failed")]
    Data {
        /// Operation identifier.
        operation: &'static str,
        /// Source data error.
        source: gatehouse_data::DataError,
    },
    /// The token service could not be constructed.
    #[error("token service operation failed")]
    Token {
        /// Operation identifier.
        operation: &'static str,
        /// Source token error.
        source: gatehouse_auth::TokenError,
    },
    /// IO operations failed.
    #[error("io operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Source IO error.
        source: io::Error,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: gatehouse_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: gatehouse_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn data(operation: &'static str, source: gatehouse_data::DataError) -> Self {
        Self::Data { operation, source }
    }

    pub(crate) const fn token(operation: &'static str, source: gatehouse_auth::TokenError) -> Self {
        Self::Token { operation, source }
    }

    pub(crate) const fn io(operation: &'static str, source: io::Error) -> Self {
        Self::Io { operation, source }
    }

    /// Operation label carried by the error, if any.
    #[must_use]
    pub const fn operation(&self) -> Option<&'static str> {
        match self {
            Self::MissingEnv { .. } => None,
            Self::Config { operation, .. }
            | Self::Telemetry { operation, .. }
            | Self::Data { operation, .. }
            | Self::Token { operation, .. }
            | Self::Io { operation, .. } => Some(*operation),
        }
    }
}
