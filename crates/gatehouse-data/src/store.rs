//! Application connection pools.

use std::fs;
use std::path::Path;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, instrument};

use crate::descriptor::{ConnectionDescriptor, EngineKind};
use crate::error::{DataError, DataResult};

/// Connection pool for the resolved engine.
#[derive(Debug, Clone)]
pub enum DataStore {
    /// Embedded database pool.
    Sqlite(SqlitePool),
    /// `MySQL` pool.
    Mysql(MySqlPool),
    /// `PostgreSQL` pool.
    Postgres(PgPool),
}

impl DataStore {
    /// Open a pool for `descriptor`. Server databases must already exist.
    ///
    /// # Errors
    ///
    /// Returns an error when the database directory cannot be created or the
    /// server refuses the connection.
    #[instrument(name = "data.connect", skip(descriptor), fields(engine = %descriptor.engine()))]
    pub async fn connect(descriptor: &ConnectionDescriptor) -> DataResult<Self> {
        let store = match descriptor.engine() {
            EngineKind::Sqlite => Self::Sqlite(connect_sqlite(descriptor.dsn_or_path()).await?),
            EngineKind::Mysql => Self::Mysql(
                MySqlPoolOptions::new()
                    .connect(descriptor.dsn_or_path())
                    .await
                    .map_err(|source| DataError::ServerUnreachable {
                        engine: EngineKind::Mysql,
                        source,
                    })?,
            ),
            EngineKind::Postgres => Self::Postgres(
                PgPoolOptions::new()
                    .connect(descriptor.dsn_or_path())
                    .await
                    .map_err(|source| DataError::ServerUnreachable {
                        engine: EngineKind::Postgres,
                        source,
                    })?,
            ),
        };
        info!("database pool ready");
        Ok(store)
    }

    /// Engine behind the pool.
    #[must_use]
    pub const fn kind(&self) -> EngineKind {
        match self {
            Self::Sqlite(_) => EngineKind::Sqlite,
            Self::Mysql(_) => EngineKind::Mysql,
            Self::Postgres(_) => EngineKind::Postgres,
        }
    }

    /// Round-trip a trivial statement.
    ///
    /// # Errors
    ///
    /// Returns `DataError::QueryFailed` when the statement fails.
    pub async fn ping(&self) -> DataResult<()> {
        let result = match self {
            Self::Sqlite(pool) => sqlx::query("SELECT 1").execute(pool).await.map(|_| ()),
            Self::Mysql(pool) => sqlx::query("SELECT 1").execute(pool).await.map(|_| ()),
            Self::Postgres(pool) => sqlx::query("SELECT 1").execute(pool).await.map(|_| ()),
        };
        result.map_err(|source| DataError::QueryFailed {
            operation: "data.ping",
            source,
        })
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        match self {
            Self::Sqlite(pool) => pool.close().await,
            Self::Mysql(pool) => pool.close().await,
            Self::Postgres(pool) => pool.close().await,
        }
    }
}

async fn connect_sqlite(path: &str) -> DataResult<SqlitePool> {
    let file = Path::new(path);
    if let Some(parent) = file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DataError::Io {
            operation: "data.sqlite.create_dir",
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let options = SqliteConnectOptions::new()
        .filename(file)
        .create_if_missing(true);
    SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .map_err(|source| DataError::QueryFailed {
            operation: "data.sqlite.connect",
            source,
        })
}
