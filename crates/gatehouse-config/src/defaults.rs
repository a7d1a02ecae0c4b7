//! Well-known configuration keys and their fallback values.
//!
//! # Design
//! - Centralize key names so the CLI, bootstrap, and resolver agree on spelling.
//! - Keep defaults explicit; mandatory keys deliberately have none.

/// Key holding the shared token-signing secret.
pub const JWT_SECRET: &str = "JWT_SECRET";
/// Key selecting the storage engine.
pub const DB_DRIVER: &str = "DB_DRIVER";
/// Full connection URL; takes precedence over discrete settings.
pub const DB_URL: &str = "DB_URL";
/// File path for the `SQLite` engine.
pub const DB_PATH: &str = "DB_PATH";
/// Database server host.
pub const DB_HOST: &str = "DB_HOST";
/// Database server port.
pub const DB_PORT: &str = "DB_PORT";
/// Database user name.
pub const DB_USERNAME: &str = "DB_USERNAME";
/// Database password.
pub const DB_PASSWORD: &str = "DB_PASSWORD";
/// Target database name.
pub const DB_DATABASE: &str = "DB_DATABASE";
/// `PostgreSQL` SSL mode.
pub const DB_SSLMODE: &str = "DB_SSLMODE";

/// Overrides the env-file location used at start-up.
pub const ENV_FILE_OVERRIDE: &str = "GATEHOUSE_ENV_FILE";
/// Env file consulted when no override is given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Engine used when `DB_DRIVER` is unset.
pub const DEFAULT_DRIVER: &str = "sqlite";
/// `SQLite` database file used when `DB_PATH` is unset.
pub const DEFAULT_SQLITE_PATH: &str = "database/database.sqlite";
/// Host used when `DB_HOST` is unset.
pub const DEFAULT_HOST: &str = "localhost";
/// `MySQL` port used when `DB_PORT` is unset.
pub const DEFAULT_MYSQL_PORT: u16 = 3306;
/// `PostgreSQL` port used when `DB_PORT` is unset.
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;
/// `PostgreSQL` SSL mode used when `DB_SSLMODE` is unset.
pub const DEFAULT_SSLMODE: &str = "disable";
