//! Errors raised while installing telemetry.

use thiserror::Error;

/// Telemetry installation failures.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber was already installed, or installation failed.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Underlying installation error.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}
