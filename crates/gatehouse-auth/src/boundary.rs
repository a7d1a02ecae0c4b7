//! Request and login boundary.
//!
//! Callers outside this crate only ever see a uniform rejection. The concrete
//! reason is logged here.

use thiserror::Error;
use tracing::{error, warn};

use crate::error::{PasswordError, TokenError};
use crate::password::PasswordHasher;
use crate::token::{Claims, TokenService};

const BEARER_PREFIX: &str = "Bearer ";

/// Uniform rejection for unauthenticated requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unauthenticated")]
pub struct Unauthenticated;

/// Errors raised by [`Authenticator::login`].
#[derive(Debug, Error)]
pub enum LoginError {
    /// The candidate password does not match, or violates the policy.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The stored digest could not be used.
    #[error("stored credential is corrupt")]
    Integrity {
        /// Underlying password error.
        #[source]
        source: PasswordError,
    },
    /// Issuing the session token failed.
    #[error("failed to issue session token")]
    Issue {
        /// Underlying token error.
        #[source]
        source: TokenError,
    },
}

/// Combines password verification and token handling for request paths.
#[derive(Debug, Clone)]
pub struct Authenticator {
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl Authenticator {
    /// Build an authenticator around an existing token service.
    #[must_use]
    pub fn new(tokens: TokenService) -> Self {
        Self {
            hasher: PasswordHasher::new(),
            tokens,
        }
    }

    /// Token service used for issuing and verifying.
    #[must_use]
    pub const fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Authenticate an `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`Unauthenticated`] on a missing scheme or any token failure.
    pub fn authenticate(&self, authorization_header: &str) -> Result<Claims, Unauthenticated> {
        let Some(token) = authorization_header
            .trim()
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|token| !token.is_empty())
        else {
            warn!(reason = "missing_bearer", "rejected request credentials");
            return Err(Unauthenticated);
        };

        self.tokens.verify(token).map_err(|err| {
            warn!(reason = err.reason(), "rejected request credentials");
            Unauthenticated
        })
    }

    /// Verify a login attempt and issue a session token.
    ///
    /// # Errors
    ///
    /// Returns `LoginError::InvalidCredentials` on mismatch and
    /// `LoginError::Integrity` when `stored_digest` is corrupt.
    pub fn login(
        &self,
        candidate: &str,
        stored_digest: &str,
        subject_id: &str,
        email: &str,
    ) -> Result<String, LoginError> {
        match self.hasher.verify(candidate, stored_digest) {
            Ok(true) => {}
            Ok(false) => return Err(LoginError::InvalidCredentials),
            Err(source) => {
                error!(
                    subject_id,
                    error = %source,
                    "stored password digest failed integrity check"
                );
                return Err(LoginError::Integrity { source });
            }
        }
        self.tokens
            .issue(subject_id, email)
            .map_err(|source| LoginError::Issue { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        let tokens = TokenService::new(b"boundary-test-secret").expect("secret");
        Authenticator::new(tokens)
    }

    #[test]
    fn bearer_header_yields_claims() -> anyhow::Result<()> {
        let auth = authenticator();
        let token = auth.tokens().issue("user-7", "seven@example.com")?;
        let claims = auth
            .authenticate(&format!("Bearer {token}"))
            .map_err(|_| anyhow::anyhow!("expected success"))?;
        assert_eq!(claims.subject_id(), "user-7");
        Ok(())
    }

    #[test]
    fn every_failure_collapses_to_unauthenticated() -> anyhow::Result<()> {
        let auth = authenticator();
        let token = auth.tokens().issue("user-7", "seven@example.com")?;
        let other = TokenService::new(b"other-secret")?.issue("user-7", "seven@example.com")?;
        for header in [
            String::new(),
            token.clone(),
            format!("Basic {token}"),
            "Bearer ".to_string(),
            "Bearer garbage".to_string(),
            format!("Bearer {other}"),
        ] {
            assert_eq!(auth.authenticate(&header), Err(Unauthenticated));
        }
        Ok(())
    }

    #[test]
    fn login_issues_token_for_matching_password() -> anyhow::Result<()> {
        let auth = authenticator();
        let digest = PasswordHasher::new().hash("hunter2-hunter2")?;
        let token = auth.login("hunter2-hunter2", &digest, "user-1", "one@example.com")?;
        assert_eq!(auth.tokens().email_from_token(&token)?, "one@example.com");
        Ok(())
    }

    #[test]
    fn login_distinguishes_mismatch_from_corruption() -> anyhow::Result<()> {
        let auth = authenticator();
        let digest = PasswordHasher::new().hash("hunter2-hunter2")?;
        assert!(matches!(
            auth.login("wrong-password", &digest, "user-1", "one@example.com"),
            Err(LoginError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("hunter2-hunter2", "corrupted", "user-1", "one@example.com"),
            Err(LoginError::Integrity { .. })
        ));
        Ok(())
    }
}
