//! Tarushiru Core - document model, normalization, aggregates and session logic.
//!
//! This crate contains the core logic of the Tarushiru journal. It is
//! storage-agnostic: the persisted document is read and written through the
//! [`store::DocumentStorage`] trait, which is implemented by the
//! `storage-file` crate (and by an in-memory store for tests).

pub mod annotations;
pub mod constants;
pub mod document;
pub mod errors;
pub mod goals;
pub mod journal;
pub mod money;
pub mod profile;
pub mod session;
pub mod store;

pub use document::{AppData, Mutation};
pub use session::{Screen, ViewController};
pub use store::{AppStore, DocumentStorage};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
