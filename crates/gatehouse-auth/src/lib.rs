#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Credential primitives for Gatehouse.
//!
//! Layout: `password.rs` (Argon2id hashing with a length policy), `token.rs`
//! (HMAC-signed session tokens), `boundary.rs` (request authentication and
//! login flows that collapse failures into uniform outcomes).

pub mod boundary;
pub mod error;
pub mod password;
pub mod token;

pub use boundary::{Authenticator, LoginError, Unauthenticated};
pub use error::{InvalidTokenReason, PasswordError, TokenError};
pub use password::PasswordHasher;
pub use token::{Claims, TOKEN_TTL_HOURS, TokenService};
