use std::path::PathBuf;

use gatehouse_auth::{Authenticator, TokenService};
use gatehouse_config::Environment;
use gatehouse_config::defaults::{DB_DRIVER, DEFAULT_ENV_FILE, ENV_FILE_OVERRIDE, JWT_SECRET};
use gatehouse_data::{ConnectionDescriptor, DataStore, EngineRegistry, ProvisionOutcome};
use gatehouse_telemetry::LoggingConfig;
use tracing::{error, info};

use crate::error::{AppError, AppResult};

/// Services available once start-up has completed.
#[derive(Debug)]
pub struct Services {
    /// Resolved storage descriptor.
    pub descriptor: ConnectionDescriptor,
    /// Result of the provisioning step.
    pub provisioned: ProvisionOutcome,
    /// Application connection pool.
    pub store: DataStore,
    /// Request and login boundary keyed by `JWT_SECRET`.
    pub authenticator: Authenticator,
}

/// Dependencies gathered before logging is installed.
pub(crate) struct BootstrapDependencies {
    env_file: PathBuf,
    env: Environment,
    logging: LoggingConfig,
    registry: EngineRegistry,
}

impl BootstrapDependencies {
    /// Hydrate configuration from the process environment and the env file.
    pub(crate) fn from_env() -> AppResult<Self> {
        let env_file = env_file_path(std::env::var(ENV_FILE_OVERRIDE).ok().as_deref());
        let env = Environment::hydrate(&env_file)
            .map_err(|err| AppError::config("environment.hydrate", err))?;
        let logging = logging_config(&env);
        Ok(Self {
            env_file,
            env,
            logging,
            registry: EngineRegistry::default(),
        })
    }
}

fn logging_config(env: &Environment) -> LoggingConfig {
    LoggingConfig::from_environment(env).with_build_version(env!("CARGO_PKG_VERSION"))
}

/// Env file consulted at start-up: the override when non-empty, `.env` otherwise.
#[must_use]
pub fn env_file_path(override_path: Option<&str>) -> PathBuf {
    override_path
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_ENV_FILE), PathBuf::from)
}

/// Entry point for the Gatehouse boot sequence.
///
/// # Errors
///
/// Returns an error if configuration, storage, or token setup fails.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(dependencies).await
}

pub(crate) async fn run_app_with(dependencies: BootstrapDependencies) -> AppResult<()> {
    gatehouse_telemetry::init_logging(&dependencies.logging)
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    info!(
        version = gatehouse_telemetry::build_version(),
        env_file = %dependencies.env_file.display(),
        "Gatehouse bootstrap starting"
    );

    let services = match prepare_services(&dependencies.env, &dependencies.registry).await {
        Ok(services) => services,
        Err(err) => {
            error!(error = %err, operation = err.operation(), "Gatehouse bootstrap failed");
            return Err(err);
        }
    };
    info!(
        engine = %services.descriptor.engine(),
        provisioned = services.provisioned.as_str(),
        "Gatehouse ready"
    );

    let shutdown = tokio::signal::ctrl_c()
        .await
        .map_err(|err| AppError::io("signal.ctrl_c", err));
    info!("shutdown requested; closing storage");
    services.store.close().await;
    shutdown
}

/// Resolve, provision, and connect storage, then build the token boundary.
///
/// # Errors
///
/// Returns an error when any step fails; a missing `JWT_SECRET` is
/// `AppError::MissingEnv`.
pub async fn prepare_services(
    env: &Environment,
    registry: &EngineRegistry,
) -> AppResult<Services> {
    let descriptor = registry
        .resolve(env.get(DB_DRIVER), env)
        .map_err(|err| AppError::data("data.resolve", err))?;
    let provisioned = registry
        .ensure_database_exists(&descriptor)
        .await
        .map_err(|err| AppError::data("data.provision", err))?;
    let store = DataStore::connect(&descriptor)
        .await
        .map_err(|err| AppError::data("data.connect", err))?;

    let tokens = match token_service(env) {
        Ok(tokens) => tokens,
        Err(err) => {
            store.close().await;
            return Err(err);
        }
    };

    Ok(Services {
        descriptor,
        provisioned,
        store,
        authenticator: Authenticator::new(tokens),
    })
}

fn token_service(env: &Environment) -> AppResult<TokenService> {
    let secret = env
        .get(JWT_SECRET)
        .ok_or(AppError::MissingEnv { name: JWT_SECRET })?;
    TokenService::new(secret).map_err(|err| AppError::token("token.new", err))
}
