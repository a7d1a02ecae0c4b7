//! Command handlers. Each returns the report printed on success.

mod provision;
mod secret;

use std::path::Path;

use crate::error::{CliError, CliResult};

pub(crate) use provision::handle_provision_db;
pub(crate) use secret::handle_generate_jwt_secret;

fn validate_env_file(path: &Path) -> CliResult<()> {
    if path.as_os_str().is_empty() {
        return Err(CliError::validation("--env-file must not be empty"));
    }
    if path.is_dir() {
        return Err(CliError::validation(format!(
            "--env-file {} is a directory",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_file_must_name_a_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(validate_env_file(&dir.path().join(".env")).is_ok());

        let empty = validate_env_file(Path::new("")).err();
        assert_eq!(empty.map(|err| err.exit_code()), Some(2));

        let directory = validate_env_file(dir.path()).err();
        assert!(
            directory
                .map(|err| err.display_message())
                .is_some_and(|message| message.ends_with("is a directory"))
        );
        Ok(())
    }
}
