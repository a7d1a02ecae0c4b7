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

//! Logging setup shared by the Gatehouse binaries.
//!
//! Layout: `init.rs` (subscriber installation and logging configuration),
//! `error.rs` (installation failures).

pub mod error;
pub mod init;

pub use error::TelemetryError;
pub use init::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_VAR, LOG_LEVEL_VAR, LogFormat, LogWriter, LoggingConfig,
    build_version, init_logging,
};
