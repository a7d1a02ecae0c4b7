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

//! Shared test helpers used across integration suites.
//! Layout: fixtures.rs (unique names, container runtime probe), servers.rs
//! (server URLs and `DB_*` settings), containers.rs (ephemeral `PostgreSQL`
//! and `MySQL` servers, overridable by URL).

pub mod containers;
pub mod fixtures;
pub mod servers;
