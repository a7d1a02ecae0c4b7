//! Seam between the registry and individual storage engines.

use async_trait::async_trait;
use gatehouse_config::Environment;

use crate::descriptor::{ConnectionDescriptor, EngineKind, ProvisionOutcome};
use crate::error::DataResult;

/// One storage backend: how to describe a connection to it and how to make
/// sure its database exists.
#[async_trait]
pub trait StorageEngine: Send + Sync {
    /// Engine implemented.
    fn kind(&self) -> EngineKind;

    /// Normalized configuration names that select this engine.
    fn names(&self) -> &'static [&'static str];

    /// Build a descriptor from configuration. Performs no network I/O.
    ///
    /// # Errors
    ///
    /// Returns an error when mandatory settings are missing or invalid.
    fn build_descriptor(&self, env: &Environment) -> DataResult<ConnectionDescriptor>;

    /// Create the target database when it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the server cannot be reached or a statement fails.
    async fn ensure_database_exists(
        &self,
        _descriptor: &ConnectionDescriptor,
    ) -> DataResult<ProvisionOutcome> {
        Ok(ProvisionOutcome::NotApplicable)
    }
}
