use anyhow::Result;
use gatehouse_config::Environment;
use gatehouse_data::provision::{quote_mysql_identifier, quote_postgres_identifier};
use gatehouse_data::{DataStore, EngineRegistry, ProvisionOutcome};
use gatehouse_test_support::containers;
use gatehouse_test_support::fixtures::unique_database_name;
use gatehouse_test_support::servers::{ExternalServer, MYSQL_URL_VAR, POSTGRES_URL_VAR};
use sqlx::Connection;
use sqlx::mysql::MySqlConnection;
use sqlx::postgres::PgConnection;
use url::Url;

fn environment_for(server: &ExternalServer, database: &str) -> Environment {
    Environment::from_pairs(server.settings(database))
}

async fn drop_mysql_database(server: &ExternalServer, database: &str) -> Result<()> {
    let mut admin = MySqlConnection::connect(server.admin_url()).await?;
    sqlx::raw_sql(&format!(
        "DROP DATABASE IF EXISTS {}",
        quote_mysql_identifier(database)
    ))
    .execute(&mut admin)
    .await?;
    admin.close().await?;
    Ok(())
}

#[tokio::test]
async fn postgres_database_is_created_once() -> Result<()> {
    let Some(test_server) = containers::postgres().await? else {
        eprintln!(
            "skipping postgres provisioning test: {POSTGRES_URL_VAR} unset and docker missing"
        );
        return Ok(());
    };
    let server = test_server.server();
    let database = unique_database_name();
    let registry = EngineRegistry::default();
    let descriptor = registry.resolve(
        Some("postgresql"),
        &environment_for(server, &database).with("DB_SSLMODE", "prefer"),
    )?;

    let first = registry.ensure_database_exists(&descriptor).await;
    let second = registry.ensure_database_exists(&descriptor).await;
    let connected = match DataStore::connect(&descriptor).await {
        Ok(store) => {
            let ping = store.ping().await;
            store.close().await;
            ping.map_err(anyhow::Error::from)
        }
        Err(err) => Err(err.into()),
    };

    let mut admin = PgConnection::connect(server.admin_url()).await?;
    sqlx::raw_sql(&format!(
        "DROP DATABASE IF EXISTS {}",
        quote_postgres_identifier(&database)
    ))
    .execute(&mut admin)
    .await?;
    admin.close().await?;

    assert_eq!(first?, ProvisionOutcome::Created);
    assert_eq!(second?, ProvisionOutcome::AlreadyPresent);
    connected
}

#[tokio::test]
async fn mysql_database_is_created_once() -> Result<()> {
    let Some(test_server) = containers::mysql().await? else {
        eprintln!("skipping mysql provisioning test: {MYSQL_URL_VAR} unset and docker missing");
        return Ok(());
    };
    let server = test_server.server();
    let database = unique_database_name();
    let registry = EngineRegistry::default();
    let descriptor = registry.resolve(Some("mysql"), &environment_for(server, &database))?;

    let first = registry.ensure_database_exists(&descriptor).await;
    let second = registry.ensure_database_exists(&descriptor).await;
    drop_mysql_database(server, &database).await?;

    assert_eq!(first?, ProvisionOutcome::Created);
    assert_eq!(second?, ProvisionOutcome::AlreadyPresent);
    Ok(())
}

#[tokio::test]
async fn mysql_url_options_reach_the_admin_connection() -> Result<()> {
    let Some(test_server) = containers::mysql().await? else {
        eprintln!("skipping mysql url provisioning test: {MYSQL_URL_VAR} unset and docker missing");
        return Ok(());
    };
    let server = test_server.server();
    let database = unique_database_name();
    let mut url = Url::parse(server.admin_url())?;
    url.set_path(&format!("/{database}"));
    url.set_query(Some("ssl-mode=preferred&charset=utf8mb4"));

    let registry = EngineRegistry::default();
    let env = Environment::from_pairs([("DB_URL", url.as_str())]);
    let descriptor = registry.resolve(Some("mysql"), &env)?;
    let outcome = registry.ensure_database_exists(&descriptor).await;
    let connected = match DataStore::connect(&descriptor).await {
        Ok(store) => {
            let ping = store.ping().await;
            store.close().await;
            ping.map_err(anyhow::Error::from)
        }
        Err(err) => Err(err.into()),
    };
    drop_mysql_database(server, &database).await?;

    assert_eq!(outcome?, ProvisionOutcome::Created);
    connected
}

#[tokio::test]
async fn wrong_password_is_reported_unreachable() -> Result<()> {
    let Some(test_server) = containers::postgres().await? else {
        eprintln!("skipping postgres credential test: {POSTGRES_URL_VAR} unset and docker missing");
        return Ok(());
    };
    let env = environment_for(test_server.server(), &unique_database_name())
        .with("DB_PASSWORD", "definitely-not-the-password")
        .with("DB_SSLMODE", "prefer");
    let registry = EngineRegistry::default();
    let descriptor = registry.resolve(Some("postgres"), &env)?;
    let outcome = registry.ensure_database_exists(&descriptor).await;
    assert!(matches!(
        outcome,
        Err(gatehouse_data::DataError::ServerUnreachable { .. })
    ));
    Ok(())
}
