//! Client-side synchronization core for the swimlog training log.
//!
//! Holds the authoritative-as-known local copy of one swimmer's training
//! sessions and competition results, mutates them optimistically against a
//! remote relational store, and keeps the personal-best view consistent
//! after every result mutation. The store and identity provider are
//! contracts ([`records::RecordStore`], [`identity::IdentityProvider`])
//! implemented elsewhere and injected at the composition root.

pub mod bests;
pub mod context;
pub mod errors;
pub mod identity;
pub mod imports;
pub mod records;
pub mod results;
pub mod search;
pub mod sessions;
pub mod stroke;
pub mod utils;

pub use context::SyncContext;
pub use errors::{Error, Result};
