//! Error types for password and token operations.

use std::fmt::{self, Display, Formatter};

use argon2::password_hash::Error as PasswordHashError;
use thiserror::Error;

/// Errors raised while hashing or verifying passwords.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The candidate password is shorter than the policy allows.
    #[error("password does not meet the length policy")]
    PolicyViolation {
        /// Minimum number of characters required.
        min_length: usize,
    },
    /// A stored digest could not be parsed; this indicates corrupted data,
    /// not a wrong password.
    #[error("stored password digest is invalid")]
    InvalidDigest {
        /// Parsing error detail.
        detail: PasswordHashError,
    },
    /// The hashing primitive failed.
    #[error("failed to hash password")]
    HashFailed {
        /// Hashing error detail.
        detail: PasswordHashError,
    },
}

/// Why a token was rejected after its signing method was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTokenReason {
    /// The signature does not match the header and claims.
    Signature,
    /// The token is past its expiry.
    Expired,
    /// The token could not be decoded.
    Malformed,
}

impl InvalidTokenReason {
    /// Stable identifier suitable for structured logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Signature => "signature",
            Self::Expired => "expired",
            Self::Malformed => "malformed",
        }
    }
}

impl Display for InvalidTokenReason {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Errors raised by the token service.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The service was configured without a secret.
    #[error("token signing secret is not configured")]
    MissingSecret,
    /// The token header declares an algorithm outside the HMAC family.
    #[error("unexpected signing method")]
    UnexpectedSigningMethod {
        /// Algorithm named by the token header.
        algorithm: String,
    },
    /// The token failed verification.
    #[error("invalid token: {0}")]
    Invalid(InvalidTokenReason),
    /// Signing a new token failed.
    #[error("failed to sign token")]
    Signing {
        /// Underlying JWT library error.
        source: jsonwebtoken::errors::Error,
    },
}

impl TokenError {
    /// Stable identifier suitable for structured logs.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::MissingSecret => "missing_secret",
            Self::UnexpectedSigningMethod { .. } => "unexpected_signing_method",
            Self::Invalid(reason) => reason.as_str(),
            Self::Signing { .. } => "signing",
        }
    }
}
