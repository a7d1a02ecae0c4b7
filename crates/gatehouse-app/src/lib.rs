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

//! Gatehouse application bootstrap wiring.
//!
//! Layout: `bootstrap.rs` (start-up sequence), `error.rs` (application errors).

/// Start-up sequence and environment loading.
pub mod bootstrap;
/// Application-level error types.
pub mod error;

pub use bootstrap::{Services, prepare_services, run_app};
pub use error::{AppError, AppResult};
