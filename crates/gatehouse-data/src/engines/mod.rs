//! Built-in storage engines.

pub mod mysql;
pub mod postgres;
pub mod sqlite;

pub use mysql::MysqlEngine;
pub use postgres::PostgresEngine;
pub use sqlite::SqliteEngine;
