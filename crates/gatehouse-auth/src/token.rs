//! HMAC-signed session tokens.
//!
//! # Design
//! - The signing secret is injected at construction; nothing here reads
//!   process state, so verification is a pure function of token, secret, and
//!   clock.
//! - The header's declared algorithm is checked against the HMAC family before
//!   the secret is used for anything. Tokens declaring `none` or an asymmetric
//!   algorithm are rejected without a signature check.
//! - Tokens live exactly [`TOKEN_TTL_HOURS`]. There is no revocation list;
//!   rotating the secret invalidates every outstanding token.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{InvalidTokenReason, TokenError};

/// Lifetime of an issued token.
pub const TOKEN_TTL_HOURS: i64 = 24;

const ISSUE_ALGORITHM: Algorithm = Algorithm::HS256;

/// Signed claim set carried by a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "user_id")]
    subject_id: String,
    email: String,
    #[serde(rename = "iat")]
    issued_at: i64,
    #[serde(rename = "exp")]
    expires_at: i64,
}

impl Claims {
    /// Identifier of the authenticated subject.
    #[must_use]
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// Email address of the authenticated subject.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Issue time as unix seconds.
    #[must_use]
    pub const fn issued_at(&self) -> i64 {
        self.issued_at
    }

    /// Expiry time as unix seconds.
    #[must_use]
    pub const fn expires_at(&self) -> i64 {
        self.expires_at
    }
}

#[derive(Deserialize)]
struct DeclaredHeader {
    alg: String,
}

/// Issues and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl TokenService {
    /// Build a service keyed by `secret`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::MissingSecret` when `secret` is empty.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, TokenError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }

    /// Issue a token for the subject, valid from now.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if the token cannot be encoded.
    pub fn issue(&self, subject_id: &str, email: &str) -> Result<String, TokenError> {
        self.issue_at(subject_id, email, Utc::now())
    }

    /// Issue a token as if signed at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if the token cannot be encoded.
    pub fn issue_at(
        &self,
        subject_id: &str,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = issued_at + Duration::hours(TOKEN_TTL_HOURS);
        let claims = Claims {
            subject_id: subject_id.to_string(),
            email: email.to_string(),
            issued_at: issued_at.timestamp(),
            expires_at: expires_at.timestamp(),
        };
        encode(&Header::new(ISSUE_ALGORITHM), &claims, &self.encoding)
            .map_err(|source| TokenError::Signing { source })
    }

    /// Verify `token` against the current time.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::UnexpectedSigningMethod` for non-HMAC headers and
    /// `TokenError::Invalid` for bad signatures, expiry, or malformed input.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify `token` against the supplied clock reading.
    ///
    /// # Errors
    ///
    /// See [`TokenService::verify`].
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let algorithm = declared_hmac_algorithm(token)?;

        let mut validation = Validation::new(algorithm);
        // Expiry is checked below against the injected clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|err| TokenError::Invalid(classify(&err)))?
            .claims;

        if now.timestamp() >= claims.expires_at {
            return Err(TokenError::Invalid(InvalidTokenReason::Expired));
        }
        Ok(claims)
    }

    /// Email claim of a verified token.
    ///
    /// # Errors
    ///
    /// See [`TokenService::verify`].
    pub fn email_from_token(&self, token: &str) -> Result<String, TokenError> {
        self.verify(token).map(|claims| claims.email)
    }

    /// Subject identifier of a verified token.
    ///
    /// # Errors
    ///
    /// See [`TokenService::verify`].
    pub fn subject_from_token(&self, token: &str) -> Result<String, TokenError> {
        self.verify(token).map(|claims| claims.subject_id)
    }
}

fn declared_hmac_algorithm(token: &str) -> Result<Algorithm, TokenError> {
    let malformed = || TokenError::Invalid(InvalidTokenReason::Malformed);
    let segment = token
        .split('.')
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or_else(malformed)?;
    let bytes = URL_SAFE_NO_PAD.decode(segment).map_err(|_| malformed())?;
    let header: DeclaredHeader = serde_json::from_slice(&bytes).map_err(|_| malformed())?;
    match header.alg.as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        _ => Err(TokenError::UnexpectedSigningMethod {
            algorithm: header.alg,
        }),
    }
}

fn classify(error: &jsonwebtoken::errors::Error) -> InvalidTokenReason {
    match error.kind() {
        ErrorKind::InvalidSignature => InvalidTokenReason::Signature,
        ErrorKind::ExpiredSignature => InvalidTokenReason::Expired,
        _ => InvalidTokenReason::Malformed,
    }
}
