//! Engine registry keyed by configuration name.
//!
//! # Design
//! - Names are matched after trimming and lowercasing; an unset or empty
//!   name selects `SQLite`.
//! - Resolution is pure. Provisioning is dispatched back to the engine that
//!   produced the descriptor.

use std::sync::Arc;

use gatehouse_config::Environment;
use gatehouse_config::defaults::DEFAULT_DRIVER;
use tracing::{debug, instrument};

use crate::descriptor::{ConnectionDescriptor, EngineKind, ProvisionOutcome};
use crate::engine::StorageEngine;
use crate::engines::{MysqlEngine, PostgresEngine, SqliteEngine};
use crate::error::{DataError, DataResult};

/// Registered storage engines.
#[derive(Clone)]
pub struct EngineRegistry {
    engines: Vec<Arc<dyn StorageEngine>>,
}

impl Default for EngineRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(SqliteEngine));
        registry.register(Arc::new(MysqlEngine));
        registry.register(Arc::new(PostgresEngine));
        registry
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("EngineRegistry")
            .field("supported", &self.supported())
            .finish()
    }
}

impl EngineRegistry {
    /// Registry with no engines.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            engines: Vec::new(),
        }
    }

    /// Add an engine. A later registration shadows earlier ones for the same
    /// names and kind.
    pub fn register(&mut self, engine: Arc<dyn StorageEngine>) {
        self.engines.insert(0, engine);
    }

    /// Every accepted engine name, in registration order.
    #[must_use]
    pub fn supported(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for engine in self.engines.iter().rev() {
            for &name in engine.names() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Engine selected by `name`, after normalization.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&dyn StorageEngine> {
        let normalized = name.trim().to_ascii_lowercase();
        self.engines
            .iter()
            .find(|engine| engine.names().contains(&normalized.as_str()))
            .map(|engine| &**engine)
    }

    fn by_kind(&self, kind: EngineKind) -> Option<&dyn StorageEngine> {
        self.engines
            .iter()
            .find(|engine| engine.kind() == kind)
            .map(|engine| &**engine)
    }

    /// Build the connection descriptor for `engine_name`.
    ///
    /// # Errors
    ///
    /// Returns `DataError::UnsupportedEngine` for unknown names, or the
    /// selected engine's configuration errors.
    pub fn resolve(
        &self,
        engine_name: Option<&str>,
        env: &Environment,
    ) -> DataResult<ConnectionDescriptor> {
        let requested = engine_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_DRIVER);
        let engine = self
            .lookup(requested)
            .ok_or_else(|| DataError::UnsupportedEngine {
                engine: requested.to_string(),
                supported: self.supported(),
            })?;
        let descriptor = engine.build_descriptor(env)?;
        debug!(engine = %descriptor.engine(), requested, "storage engine resolved");
        Ok(descriptor)
    }

    /// Ensure the descriptor's database exists, dispatching to its engine.
    ///
    /// # Errors
    ///
    /// Returns `DataError::UnsupportedEngine` when no engine of the
    /// descriptor's kind is registered, or the engine's provisioning error.
    #[instrument(
        name = "data.ensure_database",
        skip(self, descriptor),
        fields(engine = %descriptor.engine())
    )]
    pub async fn ensure_database_exists(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> DataResult<ProvisionOutcome> {
        let engine =
            self.by_kind(descriptor.engine())
                .ok_or_else(|| DataError::UnsupportedEngine {
                    engine: descriptor.engine().as_str().to_string(),
                    supported: self.supported(),
                })?;
        let outcome = engine.ensure_database_exists(descriptor).await?;
        debug!(outcome = outcome.as_str(), "database provisioning finished");
        Ok(outcome)
    }
}
