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

//! Storage backend selection and provisioning for Gatehouse.
//!
//! Layout: `descriptor.rs` (engine kinds, connection descriptors, provisioning
//! targets), `engine.rs` (the `StorageEngine` seam), `engines/` (`SQLite`,
//! `MySQL`, `PostgreSQL` implementations), `resolver.rs` (name-keyed engine
//! registry), `provision.rs` (shared admin-connection helpers), `store.rs`
//! (application connection pools).

pub mod descriptor;
pub mod engine;
pub mod engines;
pub mod error;
pub mod provision;
pub mod resolver;
mod settings;
pub mod store;

pub use descriptor::{ConnectionDescriptor, EngineKind, ProvisionOutcome, ProvisioningTarget};
pub use engine::StorageEngine;
pub use error::{DataError, DataResult};
pub use resolver::EngineRegistry;
pub use store::DataStore;
