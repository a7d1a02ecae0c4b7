//! Helpers shared by the server engines' provisioning paths.
//!
//! Each engine opens one admin connection, runs its catalog lookup and
//! `CREATE DATABASE` against it, and hands the connection to [`release`]
//! once the work has finished, whatever its result.

use sqlx::Connection;
use tracing::warn;

use crate::descriptor::EngineKind;

/// Quote a `MySQL` identifier with backticks, doubling embedded backticks.
#[must_use]
pub fn quote_mysql_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Quote a `PostgreSQL` identifier with double quotes, doubling embedded quotes.
#[must_use]
pub fn quote_postgres_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Close an admin connection; a failed close is logged and otherwise ignored.
pub(crate) async fn release<C: Connection>(engine: EngineKind, connection: C) {
    if let Err(err) = connection.close().await {
        warn!(engine = %engine, error = %err, "failed to close admin connection");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mysql_identifiers_escape_backticks() {
        assert_eq!(quote_mysql_identifier("gatehouse"), "`gatehouse`");
        assert_eq!(quote_mysql_identifier("odd`name"), "`odd``name`");
    }

    #[test]
    fn postgres_identifiers_escape_quotes() {
        assert_eq!(quote_postgres_identifier("gatehouse"), "\"gatehouse\"");
        assert_eq!(
            quote_postgres_identifier("x\"; DROP DATABASE y; --"),
            "\"x\"\"; DROP DATABASE y; --\""
        );
    }
}
