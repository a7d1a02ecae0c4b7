//! Command-line entrypoint for Gatehouse maintenance tasks.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gatehouse_config::Environment;
use gatehouse_config::defaults::{DEFAULT_ENV_FILE, ENV_FILE_OVERRIDE};
use gatehouse_telemetry::{LOG_LEVEL_VAR, LogWriter, LoggingConfig};
use tracing::debug;

use crate::commands::{handle_generate_jwt_secret, handle_provision_db};
use crate::error::CliResult;

const CLI_DEFAULT_LOG_LEVEL: &str = "warn";

/// Parses CLI arguments, executes the requested command, and prints its
/// report. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    install_logging(&Environment::from_process());
    let command_name = command_label(&cli.command);
    debug!(command = command_name, "running maintenance command");

    match dispatch(cli).await {
        Ok(report) => {
            print!("{report}");
            0
        }
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<String> {
    match cli.command {
        Command::GenerateJwtSecret(args) => handle_generate_jwt_secret(&args.env_file),
        Command::ProvisionDb(args) => handle_provision_db(&args.env_file).await,
    }
}

fn install_logging(env: &Environment) {
    if let Err(err) = gatehouse_telemetry::init_logging(&logging_config(env)) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn logging_config(env: &Environment) -> LoggingConfig {
    let mut logging = LoggingConfig::from_environment(env)
        .with_writer(LogWriter::Stderr)
        .with_build_version(env!("CARGO_PKG_VERSION"));
    if env.get(LOG_LEVEL_VAR).is_none() {
        logging.level = CLI_DEFAULT_LOG_LEVEL.to_string();
    }
    logging
}

#[derive(Parser)]
#[command(
    name = "gatehouse-cli",
    about = "Maintenance commands for Gatehouse deployments"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new `JWT_SECRET` and write it into the env file.
    GenerateJwtSecret(EnvFileArgs),
    /// Create the configured server database when it is missing.
    ProvisionDb(EnvFileArgs),
}

#[derive(Args)]
struct EnvFileArgs {
    /// Env file holding `JWT_SECRET` and the `DB_*` settings.
    #[arg(long, env = ENV_FILE_OVERRIDE, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::GenerateJwtSecret(_) => "generate_jwt_secret",
        Command::ProvisionDb(_) => "provision_db",
    }
}
