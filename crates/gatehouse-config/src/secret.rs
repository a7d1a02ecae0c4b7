//! JWT signing secret generation and persistence.
//!
//! Secrets are 32 bytes drawn from the operating system CSPRNG and encoded
//! with the URL-safe, padded base64 alphabet. Persisting a new secret
//! invalidates every token signed with the previous one.

use std::fmt;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use rand::TryRngCore;
use rand::rngs::OsRng;
use tracing::info;
use zeroize::Zeroize;

use crate::defaults::JWT_SECRET;
use crate::env_file::EnvFile;
use crate::error::{ConfigError, ConfigResult};

/// Number of random bytes in a generated secret.
pub const SECRET_LEN: usize = 32;

/// Encoded signing secret; the buffer is wiped on drop.
pub struct JwtSecret {
    encoded: String,
}

impl JwtSecret {
    /// Draw a fresh secret from the operating system random source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EntropyUnavailable` when the random source fails.
    /// There is no fallback to a weaker generator.
    pub fn generate() -> ConfigResult<Self> {
        let mut bytes = [0_u8; SECRET_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|source| ConfigError::EntropyUnavailable { source })?;
        let encoded = URL_SAFE.encode(bytes);
        bytes.zeroize();
        Ok(Self { encoded })
    }

    /// Printable form of the secret, as stored under `JWT_SECRET`.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.encoded
    }

    /// Persist the secret into the env file at `path`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the env file cannot be read or rewritten.
    pub fn apply(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        EnvFile::new(path.as_ref()).upsert(JWT_SECRET, &self.encoded)
    }

    /// Generate a new secret and persist it into the env file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when generation or persistence fails.
    pub fn rotate(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let secret = Self::generate()?;
        secret.apply(path)?;
        info!(path = %path.display(), key = JWT_SECRET, "signing secret rotated");
        Ok(secret)
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("JwtSecret(<redacted>)")
    }
}

impl Drop for JwtSecret {
    fn drop(&mut self) {
        self.encoded.zeroize();
    }
}
