//! Password hashing built around Argon2id.
//!
//! Digests are PHC strings, so the salt and cost parameters travel with the
//! hash and no separate salt storage is needed. Parameters are the `argon2`
//! crate defaults and are not configurable by callers.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    rand_core::OsRng,
};

use crate::error::PasswordError;

/// Minimum number of characters accepted by [`PasswordHasher::hash`].
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hashes and verifies user passwords.
#[derive(Clone, Default)]
pub struct PasswordHasher {
    argon: Argon2<'static>,
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PasswordHasher")
            .field("algorithm", &"argon2id")
            .finish()
    }
}

impl PasswordHasher {
    /// Construct a hasher with the vetted default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash `password` into a PHC string.
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::PolicyViolation` for passwords shorter than
    /// [`MIN_PASSWORD_LEN`] characters, checked before any hashing work, and
    /// `PasswordError::HashFailed` if the primitive fails.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        hash_with(password, |bytes| {
            let salt = SaltString::generate(&mut OsRng);
            self.argon
                .hash_password(bytes, &salt)
                .map(|hash| hash.to_string())
                .map_err(|detail| PasswordError::HashFailed { detail })
        })
    }

    /// Check `password` against a stored digest.
    ///
    /// Returns `Ok(false)` for a mismatch.
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::InvalidDigest` when `digest` is not a usable
    /// PHC string. Callers should treat this as data corruption rather than a
    /// failed login attempt.
    pub fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordError> {
        let parsed =
            PasswordHash::new(digest).map_err(|detail| PasswordError::InvalidDigest { detail })?;
        match self.argon.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(detail) => Err(PasswordError::InvalidDigest { detail }),
        }
    }
}

fn hash_with<F>(password: &str, primitive: F) -> Result<String, PasswordError>
where
    F: FnOnce(&[u8]) -> Result<String, PasswordError>,
{
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PasswordError::PolicyViolation {
            min_length: MIN_PASSWORD_LEN,
        });
    }
    primitive(password.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_and_verifies_passwords() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let digest = hasher.hash("correct horse")?;
        assert!(digest.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &digest)?);
        assert!(!hasher.verify("correct horsex", &digest)?);
        Ok(())
    }

    #[test]
    fn digest_of_longer_password_rejects_original() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let digest = hasher.hash("password1x")?;
        assert!(!hasher.verify("password1", &digest)?);
        Ok(())
    }

    #[test]
    fn same_password_gets_distinct_salts() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        assert_ne!(hasher.hash("s3cret-value")?, hasher.hash("s3cret-value")?);
        Ok(())
    }

    #[test]
    fn short_passwords_never_reach_the_primitive() {
        for candidate in ["", "a", "1234567", "ñandú12"] {
            let result = hash_with(candidate, |_| panic!("primitive must not run"));
            assert!(matches!(
                result,
                Err(PasswordError::PolicyViolation { min_length: 8 })
            ));
        }
    }

    #[test]
    fn length_policy_counts_characters_not_bytes() -> anyhow::Result<()> {
        let hashed = hash_with("ñandú123", |_| Ok("digest".to_string()))?;
        assert_eq!(hashed, "digest");
        Ok(())
    }

    #[test]
    fn corrupt_digest_is_distinct_from_mismatch() {
        let hasher = PasswordHasher::new();
        for digest in ["", "not-a-phc-string"] {
            assert!(matches!(
                hasher.verify("whatever-pass", digest),
                Err(PasswordError::InvalidDigest { .. })
            ));
        }
    }
}
