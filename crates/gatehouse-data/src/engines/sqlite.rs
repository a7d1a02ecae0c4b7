//! Embedded `SQLite` engine. The database file is created on first connect,
//! so there is nothing to provision.

use async_trait::async_trait;
use gatehouse_config::Environment;
use gatehouse_config::defaults::{DB_PATH, DEFAULT_SQLITE_PATH};

use crate::descriptor::{ConnectionDescriptor, EngineKind};
use crate::engine::StorageEngine;
use crate::error::DataResult;

/// `SQLite` storage engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteEngine;

#[async_trait]
impl StorageEngine for SqliteEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Sqlite
    }

    fn names(&self) -> &'static [&'static str] {
        &["sqlite"]
    }

    fn build_descriptor(&self, env: &Environment) -> DataResult<ConnectionDescriptor> {
        Ok(ConnectionDescriptor::sqlite(
            env.get_or(DB_PATH, DEFAULT_SQLITE_PATH),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ProvisionOutcome;

    #[test]
    fn path_defaults_when_unset() -> anyhow::Result<()> {
        let descriptor = SqliteEngine.build_descriptor(&Environment::default())?;
        assert_eq!(descriptor.dsn_or_path(), "database/database.sqlite");

        let env = Environment::from_pairs([(DB_PATH, "/var/lib/gatehouse/app.db")]);
        let descriptor = SqliteEngine.build_descriptor(&env)?;
        assert_eq!(descriptor.dsn_or_path(), "/var/lib/gatehouse/app.db");
        Ok(())
    }

    #[tokio::test]
    async fn provisioning_is_not_applicable() -> anyhow::Result<()> {
        let descriptor = ConnectionDescriptor::sqlite("unused.sqlite");
        let outcome = SqliteEngine.ensure_database_exists(&descriptor).await?;
        assert_eq!(outcome, ProvisionOutcome::NotApplicable);
        Ok(())
    }
}
