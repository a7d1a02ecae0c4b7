use std::path::Path;

use gatehouse_config::Environment;
use gatehouse_config::defaults::DB_DRIVER;
use gatehouse_data::{ConnectionDescriptor, DataError, EngineRegistry, ProvisionOutcome};

use super::validate_env_file;
use crate::error::{CliError, CliResult};

pub(crate) async fn handle_provision_db(env_file: &Path) -> CliResult<String> {
    validate_env_file(env_file)?;
    let env = Environment::hydrate(env_file).map_err(CliError::failure)?;
    provision_with(&env, &EngineRegistry::default()).await
}

async fn provision_with(env: &Environment, registry: &EngineRegistry) -> CliResult<String> {
    let descriptor = registry
        .resolve(env.get(DB_DRIVER), env)
        .map_err(classify_data_error)?;
    let outcome = registry
        .ensure_database_exists(&descriptor)
        .await
        .map_err(classify_data_error)?;
    Ok(render_outcome(&descriptor, outcome))
}

/// Configuration mistakes are the operator's to fix; everything else is a
/// failed attempt.
fn classify_data_error(err: DataError) -> CliError {
    match err {
        DataError::UnsupportedEngine { .. }
        | DataError::MissingCredential { .. }
        | DataError::InvalidSetting { .. }
        | DataError::InvalidUrl { .. } => CliError::validation(err.to_string()),
        DataError::ServerUnreachable { .. }
        | DataError::QueryFailed { .. }
        | DataError::Io { .. } => CliError::failure(err),
    }
}

fn render_outcome(descriptor: &ConnectionDescriptor, outcome: ProvisionOutcome) -> String {
    let engine = descriptor.engine();
    match (outcome, descriptor.provisioning()) {
        (ProvisionOutcome::Created, Some(target)) => format!(
            "database {} created on {engine} server {}:{}\n",
            target.database_name, target.host, target.port
        ),
        (ProvisionOutcome::AlreadyPresent, Some(target)) => format!(
            "database {} already exists on {engine} server {}:{}\n",
            target.database_name, target.host, target.port
        ),
        (ProvisionOutcome::Created | ProvisionOutcome::AlreadyPresent, None) => {
            format!("{engine} database {}\n", outcome.as_str())
        }
        (ProvisionOutcome::NotApplicable, _) => format!(
            "{engine} database at {} needs no provisioning\n",
            descriptor.dsn_or_path()
        ),
    }
}
