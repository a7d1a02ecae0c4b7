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

//! File-backed configuration for Gatehouse.
//!
//! Layout: `env_file.rs` (key=value parsing, upsert, atomic write-back),
//! `environment.rs` (immutable start-up snapshot of process + file values),
//! `secret.rs` (JWT secret generation and persistence), `defaults.rs`
//! (well-known keys and fallback values).

pub mod defaults;
pub mod env_file;
pub mod environment;
pub mod error;
pub mod secret;

pub use env_file::{ConfigEntry, EnvFile};
pub use environment::Environment;
pub use error::{ConfigError, ConfigResult};
pub use secret::JwtSecret;
