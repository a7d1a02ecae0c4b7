use std::path::Path;

use gatehouse_config::JwtSecret;
use gatehouse_config::defaults::JWT_SECRET;

use super::validate_env_file;
use crate::error::{CliError, CliResult};

pub(crate) fn handle_generate_jwt_secret(env_file: &Path) -> CliResult<String> {
    validate_env_file(env_file)?;
    let secret = JwtSecret::rotate(env_file).map_err(CliError::failure)?;
    Ok(render_secret_report(env_file, &secret))
}

fn render_secret_report(env_file: &Path, secret: &JwtSecret) -> String {
    format!(
        "{JWT_SECRET} generated and saved to {path}\n   Key: {JWT_SECRET}\n   Value: {value}\n\n\
         Keep this secret secure and never commit it to version control.\n\
         Tokens signed with the previous secret are no longer valid.\n",
        path = env_file.display(),
        value = secret.expose(),
    )
}
